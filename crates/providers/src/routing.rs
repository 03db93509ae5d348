//! Backend selection heuristic.
//!
//! A static classifier over the message text: long or analytical messages go
//! to the capable backend, everything else to the fast one. No I/O, no state.

use jarvis_config::RouterConfig;
use serde::{Deserialize, Serialize};

/// Which of the two backends answers a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Low-latency, usually local
    Fast,
    /// Deeper reasoning, usually remote
    Capable,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => f.write_str("fast"),
            Self::Capable => f.write_str("capable"),
        }
    }
}

/// Why a backend was chosen. Useful for logs and the `route` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteReason {
    Forced,
    Length { chars: usize, threshold: usize },
    Keyword(String),
    Simple,
}

impl std::fmt::Display for RouteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forced => f.write_str("fast backend forced"),
            Self::Length { chars, threshold } => {
                write!(f, "message length {chars} exceeds {threshold} characters")
            }
            Self::Keyword(k) => write!(f, "message contains keyword '{k}'"),
            Self::Simple => f.write_str("short message without analytical keywords"),
        }
    }
}

/// Length threshold plus keyword set.
#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    threshold: usize,
    keywords: Vec<String>,
}

impl RoutingPolicy {
    pub fn new(threshold: usize, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            threshold,
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(config.complexity_threshold, config.complex_keywords.iter().cloned())
    }

    /// Pick a backend for `message`.
    pub fn select(&self, message: &str, force_fast: bool) -> BackendKind {
        self.explain(message, force_fast).0
    }

    /// Pick a backend and report which rule decided it.
    pub fn explain(&self, message: &str, force_fast: bool) -> (BackendKind, RouteReason) {
        if force_fast {
            return (BackendKind::Fast, RouteReason::Forced);
        }

        let chars = message.chars().count();
        if chars > self.threshold {
            return (
                BackendKind::Capable,
                RouteReason::Length {
                    chars,
                    threshold: self.threshold,
                },
            );
        }

        let lowered = message.to_lowercase();
        if let Some(keyword) = self.keywords.iter().find(|k| lowered.contains(k.as_str())) {
            return (BackendKind::Capable, RouteReason::Keyword(keyword.clone()));
        }

        (BackendKind::Fast, RouteReason::Simple)
    }
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_plain_message_goes_fast() {
        let policy = RoutingPolicy::default();
        assert_eq!(policy.select("What time is it?", false), BackendKind::Fast);
        assert_eq!(policy.select("", false), BackendKind::Fast);
    }

    #[test]
    fn long_message_goes_capable_regardless_of_keywords() {
        let policy = RoutingPolicy::default();
        let long = "x".repeat(301);
        assert_eq!(policy.select(&long, false), BackendKind::Capable);
        let (_, reason) = policy.explain(&long, false);
        assert!(matches!(reason, RouteReason::Length { chars: 301, threshold: 300 }));
    }

    #[test]
    fn threshold_is_exclusive() {
        let policy = RoutingPolicy::default();
        assert_eq!(policy.select(&"a".repeat(300), false), BackendKind::Fast);
        assert_eq!(policy.select(&"a".repeat(301), false), BackendKind::Capable);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let policy = RoutingPolicy::default();
        // 200 two-byte characters: 400 bytes, 200 chars
        assert_eq!(policy.select(&"é".repeat(200), false), BackendKind::Fast);
    }

    #[test]
    fn keyword_routes_capable_case_insensitively() {
        let policy = RoutingPolicy::default();
        for msg in [
            "Plan my week",
            "compare rust and go",
            "Walk me through it STEP BY STEP",
            "please ANALYZE this",
        ] {
            assert_eq!(policy.select(msg, false), BackendKind::Capable, "{msg}");
        }
    }

    #[test]
    fn force_fast_overrides_everything() {
        let policy = RoutingPolicy::default();
        let long_with_keyword = format!("design {}", "y".repeat(500));
        let (kind, reason) = policy.explain(&long_with_keyword, true);
        assert_eq!(kind, BackendKind::Fast);
        assert_eq!(reason, RouteReason::Forced);
    }

    #[test]
    fn custom_keywords_are_lowercased() {
        let policy = RoutingPolicy::new(50, ["Refactor"]);
        assert_eq!(policy.select("please refactor this", false), BackendKind::Capable);
        assert_eq!(policy.select("plan a trip", false), BackendKind::Fast);
    }
}
