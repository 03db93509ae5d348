//! Built-in capabilities for Jarvis.
//!
//! Each capability takes one text input and returns one text result:
//! do math, tell the time, read/write/list files in the workspace,
//! remember facts, and send webhook notifications.

pub mod calculator;
pub mod files;
pub mod notify;
pub mod remember;
pub mod sandbox;
pub mod time;

use std::sync::Arc;

use jarvis_core::error::ToolError;
use jarvis_core::memory::MemoryBackend;
use jarvis_core::tool::ToolRegistry;

pub use sandbox::Workspace;

/// Create the registry with every built-in capability.
///
/// File capabilities are confined to `workspace`; `remember` writes to
/// `memory`.
pub fn default_registry(
    workspace: Workspace,
    memory: Arc<dyn MemoryBackend>,
) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(calculator::CalculatorTool))?;
    registry.register(Box::new(time::GetTimeTool))?;
    registry.register(Box::new(files::ReadFileTool::new(workspace.clone())))?;
    registry.register(Box::new(files::ListFilesTool::new(workspace.clone())))?;
    registry.register(Box::new(files::WriteFileTool::new(workspace)))?;
    registry.register(Box::new(remember::RememberTool::new(memory)))?;
    registry.register(Box::new(notify::NotifyTool::new()))?;
    Ok(registry)
}
