//! `jarvis remember`: store a fact through the `remember` tool.

use jarvis_core::memory::MemoryBackend;

use super::{CliResult, build_memory, build_registry, load_config};

pub async fn run(text: &str) -> CliResult {
    let config = load_config()?;
    let memory = build_memory(&config.memory);
    let registry = build_registry(&config, memory.clone())?;

    let ack = registry.resolve("remember")?.execute(text).await?;
    println!("{ack}");
    println!("  Backend: {} ({} memories)", memory.name(), memory.count().await?);
    Ok(())
}
