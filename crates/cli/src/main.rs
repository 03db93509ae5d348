//! Jarvis CLI, the main entry point.
//!
//! Commands:
//! - `onboard`: create the config file and workspace
//! - `agent`: run a task through the ReAct loop (or an interactive session)
//! - `chat`: one direct message through the router with a prompt mode
//! - `route`: show which backend a message would go to
//! - `tools`: list the built-in capabilities
//! - `remember`: store a fact in long-term memory
//! - `doctor`: check config, workspace and backend health

use clap::{Parser, Subcommand};
use jarvis_agent::ChatMode;

mod commands;

#[derive(Parser)]
#[command(
    name = "jarvis",
    about = "Jarvis: local-first ReAct agent with fast/capable backend routing",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and workspace
    Onboard,

    /// Run a task with the reasoning agent
    Agent {
        /// The task; omit to enter interactive mode
        task: Option<String>,

        /// Extra context appended to the prompt
        #[arg(short, long)]
        context: Option<String>,

        /// Override the step limit
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Override how many memories are recalled into the prompt
        #[arg(long)]
        recall_limit: Option<usize>,

        /// Send every step to the fast backend
        #[arg(long)]
        fast: bool,

        /// Print the full result (steps included) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send one message directly to the router
    Chat {
        message: String,

        /// Prompt mode: normal, coding, quiz, eli5, flashcard, tutor
        #[arg(short, long, default_value = "normal")]
        mode: ChatMode,

        /// Force the fast backend
        #[arg(long)]
        fast: bool,

        /// Print the answer as it is generated
        #[arg(long)]
        stream: bool,
    },

    /// Show the routing decision for a message (no network calls)
    Route {
        message: String,

        #[arg(long)]
        fast: bool,
    },

    /// List the built-in tools
    Tools,

    /// Store a fact in long-term memory
    Remember { text: String },

    /// Diagnose system health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Agent {
            task,
            context,
            max_iterations,
            recall_limit,
            fast,
            json,
        } => {
            let opts = commands::agent::AgentOptions {
                context,
                max_iterations,
                recall_limit,
                fast,
                json,
            };
            commands::agent::run(task, opts).await?
        }
        Commands::Chat {
            message,
            mode,
            fast,
            stream,
        } => commands::chat::run(&message, mode, fast, stream).await?,
        Commands::Route { message, fast } => commands::route::run(&message, fast)?,
        Commands::Tools => commands::tools::run()?,
        Commands::Remember { text } => commands::remember::run(&text).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
