//! Subcommand implementations and the wiring they share.

pub mod agent;
pub mod chat;
pub mod doctor;
pub mod onboard;
pub mod remember;
pub mod route;
pub mod tools;

use std::sync::Arc;

use jarvis_config::{AppConfig, MemoryBackendKind, MemoryConfig};
use jarvis_core::memory::MemoryBackend;
use jarvis_core::tool::ToolRegistry;
use jarvis_memory::{FileBackend, InMemoryBackend};
use jarvis_tools::Workspace;
use tracing::debug;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn load_config() -> CliResult<AppConfig> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

pub fn build_memory(config: &MemoryConfig) -> Arc<dyn MemoryBackend> {
    debug!(backend = ?config.backend, path = %config.path.display(), "Opening memory");
    match config.backend {
        MemoryBackendKind::File => Arc::new(FileBackend::new(config.path.clone())),
        MemoryBackendKind::InMemory => Arc::new(InMemoryBackend::new()),
    }
}

/// Registry of built-in tools, creating the workspace directory if needed.
pub fn build_registry(
    config: &AppConfig,
    memory: Arc<dyn MemoryBackend>,
) -> jarvis_core::Result<ToolRegistry> {
    let root = &config.tools.workspace;
    if !root.exists() {
        std::fs::create_dir_all(root).map_err(|e| jarvis_core::Error::Config {
            message: format!("cannot create workspace {}: {e}", root.display()),
        })?;
    }
    Ok(jarvis_tools::default_registry(Workspace::new(root), memory)?)
}
