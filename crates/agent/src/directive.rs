//! Tool directive parsing.
//!
//! A model response asks for a capability with two marker lines:
//!
//! ```text
//! TOOL: calculator
//! INPUT: 25 * 4
//! ```
//!
//! Markers are matched case-insensitively anywhere in the response. The tool
//! name is a single word (lower-cased on the way out); the input is the rest
//! of the `INPUT:` line, trimmed, or the following line when the marker
//! stands alone. A response with only one marker, or with an
//! empty input, carries no directive and is treated as a final answer.

use std::sync::LazyLock;

use regex_lite::Regex;

static TOOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TOOL:\s*(\w+)").expect("valid TOOL pattern"));

static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)INPUT:[ \t]*(?:\r?\n[ \t]*)?([^\r\n]+)").expect("valid INPUT pattern")
});

/// A request to run one capability with one text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDirective {
    pub tool: String,
    pub input: String,
}

/// Extract the first tool directive from a model response, if any.
pub fn parse_directive(response: &str) -> Option<ToolDirective> {
    let tool = TOOL_RE.captures(response)?.get(1)?.as_str().to_lowercase();
    let input = INPUT_RE.captures(response)?.get(1)?.as_str().trim();
    if input.is_empty() {
        return None;
    }
    Some(ToolDirective {
        tool,
        input: input.to_string(),
    })
}
