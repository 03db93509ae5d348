//! The running transcript of one reasoning task.
//!
//! Segments are appended in order and never edited; the whole transcript is
//! what gets sent to the model on every iteration.

/// Append-only sequence of text segments.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    segments: Vec<String>,
}

impl Transcript {
    /// Start a transcript with its initial prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            segments: vec![prompt.into()],
        }
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Record a model response together with the observation that followed it.
    pub fn push_exchange(&mut self, response: &str, observation: &str) {
        self.push(format!("\n{response}\n\n[System] {observation}\n\nContinue reasoning:"));
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The full transcript text.
    pub fn render(&self) -> String {
        self.segments.concat()
    }
}

/// Observation for a capability that ran (successfully or not).
pub fn tool_output(tool: &str, output: &str) -> String {
    format!("Tool '{tool}' Output: {output}")
}

/// Observation for a directive naming a capability that is not registered.
pub fn tool_not_found(tool: &str, available: &[&str]) -> String {
    format!(
        "Error: Tool '{tool}' not found. Available tools: {}",
        available.join(", ")
    )
}
