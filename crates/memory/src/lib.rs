//! Long-term memory backends for Jarvis.
//!
//! Both backends rank entries with the same keyword scoring, defined here.

pub mod file_backend;
pub mod in_memory;

pub use file_backend::FileBackend;
pub use in_memory::InMemoryBackend;

use jarvis_core::memory::{MemoryEntry, MemoryQuery};

/// Words shorter than this are ignored when matching.
const MIN_TERM_LEN: usize = 3;

fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TERM_LEN)
        .map(str::to_lowercase)
        .collect()
}

/// Relevance of `content` to `query` in `[0, 2]`.
///
/// The fraction of query terms found in the content, plus one if the query's
/// terms appear in the content consecutively. Queries without usable terms
/// only match as a raw substring.
pub fn keyword_score(query: &str, content: &str) -> f32 {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return 0.0;
    }
    let content_lower = content.to_lowercase();

    let query_terms = terms(&query_lower);
    if query_terms.is_empty() {
        return if content_lower.contains(&query_lower) { 1.0 } else { 0.0 };
    }
    let content_terms = terms(&content_lower);
    let matched = query_terms
        .iter()
        .filter(|t| content_terms.iter().any(|c| c == *t))
        .count();

    let phrase = format!(" {} ", query_terms.join(" "));
    let haystack = format!(" {} ", content_terms.join(" "));
    let phrase_bonus = if haystack.contains(&phrase) { 1.0 } else { 0.0 };

    matched as f32 / query_terms.len() as f32 + phrase_bonus
}

/// Score, filter, sort, and truncate entries for a query.
pub(crate) fn rank<'a>(
    entries: impl Iterator<Item = &'a MemoryEntry>,
    query: &MemoryQuery,
) -> Vec<MemoryEntry> {
    let mut results: Vec<MemoryEntry> = entries
        .filter_map(|e| {
            let score = keyword_score(&query.text, &e.content);
            (score > 0.0 && score >= query.min_score).then(|| {
                let mut hit = e.clone();
                hit.score = score;
                hit
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    results.truncate(query.limit);
    results
}
