//! Tool trait: the abstraction over agent capabilities.
//!
//! Tools are what give the agent the ability to act in the world:
//! evaluate arithmetic, read/write files, store memories, send notifications.
//!
//! Every tool takes a single text argument and returns a single text result.
//! Richer arguments are encoded by the tool itself as a delimited string
//! (e.g. `"filename||content"`).

use async_trait::async_trait;
use std::collections::HashMap;
use crate::error::ToolError;
use tracing::debug;

/// The core Tool trait.
///
/// Each capability (calculator, read_file, remember, etc.) implements this
/// trait. Tools are registered in the [`ToolRegistry`] at startup and made
/// available to the reasoning loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "calculator", "read_file").
    fn name(&self) -> &str;

    /// A one-line description of what this tool does and what input it takes.
    /// Rendered verbatim into the agent's prompt.
    fn description(&self) -> &str;

    /// Execute the tool with the given text input.
    async fn execute(&self, input: &str) -> std::result::Result<String, ToolError>;
}

/// A registry of available tools.
///
/// Keeps registration order (so prompt listings are stable) and a name index
/// for constant-time lookup in the reasoning loop. Registering a name twice
/// is an error.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Fails if a tool with the same name already exists.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> std::result::Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateName(name));
        }
        debug!(tool = %name, "Registered tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Resolve a tool by name.
    pub fn resolve(&self, name: &str) -> std::result::Result<&dyn Tool, ToolError> {
        self.index
            .get(name)
            .map(|&i| self.tools[i].as_ref())
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    /// Get a tool by name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.resolve(name).ok()
    }

    /// Render every tool as a `- name: description` line, in registration order.
    pub fn describe_all(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- {}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// List all registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
