//! `jarvis chat`: one message straight through the router.

use std::io::Write;

use futures::StreamExt;
use jarvis_agent::ChatMode;
use jarvis_providers::{GenerateRequest, Generation, build_from_config};
use jarvis_tools::time;

use super::{CliResult, load_config};

pub async fn run(message: &str, mode: ChatMode, fast: bool, stream: bool) -> CliResult {
    let config = load_config()?;
    let router = build_from_config(&config);

    let now = time::describe(&chrono::Local::now());
    let request = GenerateRequest::new(message)
        .with_system_prompt(mode.system_prompt(message, &now))
        .with_temperature(config.agent.temperature)
        .with_max_tokens(config.agent.max_tokens)
        .streaming(stream)
        .force_fast(fast);

    match router.generate(request).await? {
        Generation::Text(text) => println!("{text}"),
        Generation::Stream(mut fragments) => {
            let mut stdout = std::io::stdout();
            while let Some(fragment) = fragments.next().await {
                write!(stdout, "{}", fragment?)?;
                stdout.flush()?;
            }
            writeln!(stdout)?;
        }
    }
    Ok(())
}
