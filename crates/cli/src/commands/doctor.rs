//! `jarvis doctor`: diagnose system health.

use jarvis_config::{AppConfig, MemoryBackendKind};
use jarvis_providers::build_from_config;

use super::CliResult;

pub async fn run() -> CliResult {
    println!("Jarvis Doctor: System Diagnostics");
    println!("=================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  [ok]   Config file: {}", config_path.display());
    } else {
        println!("  [warn] No config file, using defaults (run `jarvis onboard`)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  [ok]   Configuration valid");
            config
        }
        Err(e) => {
            println!("  [fail] Configuration invalid: {e}");
            println!("\n  1 blocking issue found. Fix the config and re-run.");
            return Ok(());
        }
    };

    if config.tools.workspace.is_dir() {
        println!("  [ok]   Workspace: {}", config.tools.workspace.display());
    } else {
        println!(
            "  [warn] Workspace missing: {} (run `jarvis onboard`)",
            config.tools.workspace.display()
        );
        issues += 1;
    }

    match config.memory.backend {
        MemoryBackendKind::File => {
            println!("  [ok]   Memory: file store at {}", config.memory.path.display());
        }
        MemoryBackendKind::InMemory => {
            println!("  [ok]   Memory: in-memory (facts are lost on exit)");
        }
    }

    if !config.backends.capable.is_enabled() {
        println!(
            "  [warn] Capable backend '{}' disabled: set GEMINI_API_KEY to enable it",
            config.backends.capable.name
        );
        issues += 1;
    }

    let router = build_from_config(&config);
    for (kind, name, status) in router.health().await {
        match status {
            Ok(true) => println!("  [ok]   {kind} backend '{name}' reachable"),
            Ok(false) => {
                println!("  [warn] {kind} backend '{name}' answered but is not healthy");
                issues += 1;
            }
            Err(e) => {
                println!("  [fail] {kind} backend '{name}' unreachable: {e}");
                issues += 1;
            }
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
