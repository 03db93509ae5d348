//! `jarvis agent`: run a task through the ReAct loop.

use std::sync::Arc;

use jarvis_agent::{ReactAgent, TaskResult};
use jarvis_providers::build_from_config;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{CliResult, build_memory, build_registry, load_config};

pub struct AgentOptions {
    pub context: Option<String>,
    pub max_iterations: Option<usize>,
    pub recall_limit: Option<usize>,
    pub fast: bool,
    pub json: bool,
}

pub async fn run(task: Option<String>, opts: AgentOptions) -> CliResult {
    let config = load_config()?;

    let router = Arc::new(build_from_config(&config));
    let memory = build_memory(&config.memory);
    let tools = Arc::new(build_registry(&config, memory.clone())?);

    let mut agent = ReactAgent::from_config(router.clone(), tools.clone(), &config.agent)
        .with_memory(memory)
        .prefer_fast(opts.fast || config.agent.prefer_fast_backend);
    if let Some(max) = opts.max_iterations {
        agent = agent.with_max_iterations(max);
    }
    if let Some(limit) = opts.recall_limit {
        agent = agent.with_recall_limit(limit);
    }

    if let Some(task) = task {
        eprint!("  Thinking...");
        let result = agent.execute(&task, opts.context.as_deref()).await;
        eprint!("\r              \r");
        print_result(&result, opts.json)?;
        if !result.success {
            return Err("Task failed".into());
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Jarvis Agent: Interactive Mode");
    println!();
    println!("  Fast backend:     {} ({})", config.backends.fast.name, config.backends.fast.model);
    if router.has_capable() {
        println!(
            "  Capable backend:  {} ({})",
            config.backends.capable.name, config.backends.capable.model
        );
    } else {
        println!("  Capable backend:  (disabled)");
    }
    println!("  Tools:            {}", tools.names().join(", "));
    println!("  Step limit:       {}", agent.max_iterations());
    println!();
    println!("  Type a task and press Enter. Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("  You > ");
        use std::io::Write;
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        eprint!("  ...");
        let result = agent.execute(line, opts.context.as_deref()).await;
        eprint!("\r     \r");
        println!();
        print_result(&result, opts.json)?;
        println!();
    }

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}

fn print_result(result: &TaskResult, json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    for step in &result.steps {
        println!(
            "  [step {}] {}({}) -> {}",
            step.step,
            step.tool,
            step.tool_input,
            preview(&step.tool_output, 120)
        );
    }
    if !result.steps.is_empty() {
        println!();
    }
    if result.success {
        for line in result.output.lines() {
            println!("  Jarvis > {line}");
        }
    } else {
        eprintln!("  [Error] {}", result.output);
    }
    Ok(())
}

/// First `max` characters of `text` on one line.
fn preview(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{cut}...")
}
