//! `jarvis onboard`: first-time setup.

use jarvis_config::AppConfig;

use super::CliResult;

pub async fn run() -> CliResult {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");
    let defaults = AppConfig::default();

    println!("Jarvis: First-Time Setup");
    println!("========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("  Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    let workspace_dir = &defaults.tools.workspace;
    if !workspace_dir.exists() {
        std::fs::create_dir_all(workspace_dir)?;
        println!("  Created workspace directory: {}", workspace_dir.display());
    }

    if let Some(memory_dir) = defaults.memory.path.parent()
        && !memory_dir.exists()
    {
        std::fs::create_dir_all(memory_dir)?;
        println!("  Created memory directory: {}", memory_dir.display());
    }

    if config_path.exists() {
        println!("\n  Config already exists at: {}", config_path.display());
        println!("  Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("  Created config.toml at: {}", config_path.display());
        println!("\n  Next steps:");
        println!("   1. Start Ollama and pull {}", defaults.backends.fast.model);
        println!("   2. Optional: export GEMINI_API_KEY=... for the capable backend");
        println!("   3. Run: jarvis agent \"What time is it?\"\n");
    }

    println!("  Setup complete! Run `jarvis doctor` to check your backends.\n");

    Ok(())
}
