//! End-to-end integration tests for the Jarvis agent.
//!
//! These exercise the full pipeline from task to result: context assembly,
//! routing with fallback and pacing, directive parsing, the built-in tools
//! and long-term memory.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use jarvis_agent::{ReactAgent, STEP_LIMIT_MESSAGE, Termination};
use jarvis_config::AppConfig;
use jarvis_core::error::ProviderError;
use jarvis_core::memory::MemoryBackend;
use jarvis_core::message::Message;
use jarvis_core::provider::{Provider, ProviderRequest, ProviderResponse};
use jarvis_memory::FileBackend;
use jarvis_providers::{BackendKind, InferenceRouter, build_from_config};
use jarvis_tools::{Workspace, default_registry};

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock backend that replays scripted outcomes in sequence and records
/// the prompt of every call.
struct ScriptedProvider {
    script: Vec<Result<String, ProviderError>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn replies(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self::new(replies.iter().map(|r| Ok(r.to_string())).collect()))
    }

    fn down() -> Arc<Self> {
        Arc::new(Self::new(vec![Err(ProviderError::Network(
            "connection refused".into(),
        ))]))
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let index = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(
                request
                    .messages
                    .last()
                    .map(|m| m.content.clone())
                    .unwrap_or_default(),
            );
            prompts.len() - 1
        };
        let outcome = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .expect("script must not be empty");
        outcome.map(|text| ProviderResponse {
            message: Message::assistant(text),
            usage: None,
            model: "e2e".into(),
        })
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

struct Fixture {
    _dir: tempfile::TempDir,
    workspace: std::path::PathBuf,
    memory_path: std::path::PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let workspace = dir.path().join("workspace");
        std::fs::create_dir_all(&workspace).unwrap();
        let memory_path = dir.path().join("memory").join("memories.jsonl");
        Self {
            _dir: dir,
            workspace,
            memory_path,
        }
    }

    fn memory(&self) -> Arc<dyn MemoryBackend> {
        Arc::new(FileBackend::new(self.memory_path.clone()))
    }

    fn agent(&self, router: InferenceRouter, memory: Arc<dyn MemoryBackend>) -> ReactAgent {
        let registry =
            default_registry(Workspace::new(&self.workspace), memory.clone()).unwrap();
        ReactAgent::new(Arc::new(router), Arc::new(registry)).with_memory(memory)
    }
}

fn unpaced(fast: Arc<ScriptedProvider>) -> InferenceRouter {
    InferenceRouter::new(fast).with_min_delay(Duration::ZERO)
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[tokio::test]
async fn calculator_task_with_builtin_registry() {
    let fx = Fixture::new();
    let fast = ScriptedProvider::replies(&[
        "I need to multiply.\nTOOL: calculator\nINPUT: 25 * 4",
        "The result is 100",
    ]);
    let agent = fx.agent(unpaced(fast.clone()), fx.memory());

    let result = agent.execute("Calculate 25 * 4", None).await;

    assert!(result.success);
    assert!(result.output.contains("100"));
    assert_eq!(result.steps.len(), 1);
    assert_eq!(result.steps[0].tool, "calculator");
    assert_eq!(result.steps[0].tool_output, "100");

    // The initial prompt lists every built-in tool in registration order.
    let first = &fast.prompts()[0];
    let listing = "CAPABILITIES:\n- calculator: ";
    assert!(first.contains(listing));
    for name in ["get_time", "read_file", "list_files", "write_file", "remember", "notify"] {
        assert!(first.contains(&format!("\n- {name}: ")), "{name} missing");
    }
}

#[tokio::test]
async fn write_then_read_a_workspace_file() {
    let fx = Fixture::new();
    let fast = ScriptedProvider::replies(&[
        "TOOL: write_file\nINPUT: notes/todo.txt||buy milk",
        "TOOL: read_file\nINPUT: notes/todo.txt",
        "Your note says: buy milk",
    ]);
    let agent = fx.agent(unpaced(fast.clone()), fx.memory());

    let result = agent.execute("Save a note and read it back", None).await;

    assert!(result.success);
    assert_eq!(result.steps.len(), 2);
    assert!(result.steps[0].tool_output.starts_with("File written successfully: notes/todo.txt"));
    assert!(result.steps[1].tool_output.contains("buy milk"));
    assert_eq!(
        std::fs::read_to_string(fx.workspace.join("notes/todo.txt")).unwrap(),
        "buy milk"
    );
}

#[tokio::test]
async fn sandbox_escape_is_reported_not_executed() {
    let fx = Fixture::new();
    let fast = ScriptedProvider::replies(&[
        "TOOL: read_file\nINPUT: ../../etc/passwd",
        "I am not allowed to read that file.",
    ]);
    let agent = fx.agent(unpaced(fast.clone()), fx.memory());

    let result = agent.execute("Read /etc/passwd", None).await;

    assert!(result.success);
    assert_eq!(result.steps.len(), 1);
    assert!(result.steps[0].tool_output.starts_with("Error executing tool: Permission denied"));
    assert!(fast.prompts()[1].contains("path traversal detected"));
}

#[tokio::test]
async fn remembered_fact_is_recalled_by_a_later_task() {
    let fx = Fixture::new();

    // First session stores a fact through the `remember` tool.
    let fast = ScriptedProvider::replies(&[
        "TOOL: remember\nINPUT: The user's favourite language is Rust",
        "Noted.",
    ]);
    let agent = fx.agent(unpaced(fast), fx.memory());
    let stored = agent.execute("Remember that my favourite language is Rust", None).await;
    assert!(stored.steps[0].tool_output.starts_with("Memory stored successfully (ID: "));

    // A fresh backend over the same file sees it.
    let fast = ScriptedProvider::replies(&["Rust"]);
    let agent = fx.agent(unpaced(fast.clone()), fx.memory());
    let result = agent.execute("What is my favourite language?", None).await;

    assert_eq!(result.output, "Rust");
    assert!(fast.prompts()[0].contains(
        "RELEVANT MEMORIES:\n- The user's favourite language is Rust\n"
    ));
}

#[tokio::test]
async fn capable_outage_falls_back_to_fast() {
    let fx = Fixture::new();
    let fast = ScriptedProvider::replies(&["TOOL: calculator\nINPUT: 2 ^ 10", "1024"]);
    let capable = ScriptedProvider::down();
    let router = unpaced(fast.clone()).with_capable(capable.clone());
    let agent = fx.agent(router, fx.memory());

    let result = agent.execute("What is 2 to the 10th?", None).await;

    assert!(result.success);
    assert_eq!(result.output, "1024");
    assert_eq!(result.steps[0].tool_output, "1024");
    // The prompt is long, so every step tried the capable backend first.
    assert_eq!(capable.calls(), 2);
    assert_eq!(fast.calls(), 2);
}

#[tokio::test]
async fn total_outage_fails_the_task() {
    let fx = Fixture::new();
    let router = unpaced(ScriptedProvider::down()).with_capable(ScriptedProvider::down());
    let agent = fx.agent(router, fx.memory());

    let result = agent.execute("anything", None).await;

    assert!(!result.success);
    assert_eq!(result.termination, Termination::BackendFailure);
    assert!(result.output.starts_with("An error occurred during execution:"));
    assert!(result.steps.is_empty());
}

#[tokio::test]
async fn looping_model_hits_the_step_limit() {
    let fx = Fixture::new();
    let fast = ScriptedProvider::replies(&["TOOL: get_time\nINPUT: now"]);
    let agent = fx.agent(unpaced(fast.clone()), fx.memory()).with_max_iterations(4);

    let result = agent.execute("Keep checking the time", None).await;

    assert!(result.success);
    assert_eq!(result.termination, Termination::StepLimitReached);
    assert_eq!(result.output, STEP_LIMIT_MESSAGE);
    assert_eq!(result.steps.len(), 4);
    assert_eq!(fast.calls(), 4);
    assert!(result
        .steps
        .iter()
        .all(|s| s.tool_output.starts_with("Current date and time: ")));
}

#[tokio::test(start_paused = true)]
async fn reasoning_steps_are_paced_by_the_router() {
    let fx = Fixture::new();
    let fast = ScriptedProvider::replies(&["TOOL: calculator\nINPUT: 1 + 1", "2"]);
    let router = InferenceRouter::new(fast.clone()).with_min_delay(Duration::from_millis(500));
    let agent = fx.agent(router, fx.memory());

    let start = tokio::time::Instant::now();
    let result = agent.execute("1 + 1", None).await;

    assert_eq!(result.output, "2");
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[test]
fn default_config_without_key_routes_everything_fast() {
    let config = AppConfig::default();
    let router = build_from_config(&config);

    assert!(!router.has_capable());
    let long = "x".repeat(1_000);
    assert_eq!(router.route(&long, false).0, BackendKind::Fast);
    assert_eq!(router.route("compare these designs", false).0, BackendKind::Fast);
}

#[test]
fn configured_key_enables_capable_routing() {
    let mut config = AppConfig::default();
    config.backends.capable.api_key = Some("test-key".into());
    let router = build_from_config(&config);

    assert!(router.has_capable());
    assert_eq!(router.route("hi there", false).0, BackendKind::Fast);
    assert_eq!(router.route("please analyze this", false).0, BackendKind::Capable);
    assert_eq!(router.route(&"y".repeat(301), false).0, BackendKind::Capable);
    assert_eq!(router.route("please analyze this", true).0, BackendKind::Fast);
}
