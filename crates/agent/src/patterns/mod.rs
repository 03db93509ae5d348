//! Agent patterns: structured reasoning strategies.
//!
//! Currently one pattern, **ReAct**: think, optionally call a tool,
//! observe its output, repeat until the model answers or the step limit
//! is reached.

pub mod react;

pub use react::{ReactAgent, StepRecord, TaskResult, Termination};

#[cfg(test)]
pub(crate) mod test_helpers;
