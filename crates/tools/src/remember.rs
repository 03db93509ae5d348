//! Remember tool: stores a fact in long-term memory.

use async_trait::async_trait;
use jarvis_core::error::ToolError;
use jarvis_core::memory::{MemoryBackend, MemoryEntry};
use jarvis_core::tool::Tool;
use std::sync::Arc;
use tracing::debug;

pub struct RememberTool {
    memory: Arc<dyn MemoryBackend>,
}

impl RememberTool {
    pub fn new(memory: Arc<dyn MemoryBackend>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for RememberTool {
    fn name(&self) -> &str {
        "remember"
    }

    fn description(&self) -> &str {
        "Store a fact or memory for the future. Input: text to remember."
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        let fact = input.trim();
        if fact.is_empty() {
            return Err(ToolError::InvalidArguments("Nothing to remember".into()));
        }

        let entry = MemoryEntry::new(fact).with_source("remember");
        let id = self
            .memory
            .store(entry)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "remember".into(),
                reason: format!("Failed to store memory: {e}"),
            })?;

        debug!(id = %id, backend = self.memory.name(), "Stored memory");
        Ok(format!("Memory stored successfully (ID: {id})"))
    }
}
