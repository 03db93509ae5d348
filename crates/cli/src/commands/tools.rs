//! `jarvis tools`: list the built-in tools.

use super::{CliResult, build_memory, build_registry, load_config};

pub fn run() -> CliResult {
    let config = load_config()?;
    let registry = build_registry(&config, build_memory(&config.memory))?;

    println!("Built-in tools ({}):", registry.len());
    println!("{}", registry.describe_all());
    println!();
    println!("Workspace: {}", config.tools.workspace.display());
    Ok(())
}
