//! ReAct pattern: Thought, Action, Observation loop.
//!
//! Each iteration sends the whole transcript to the inference router and
//! inspects the response for a tool directive:
//!
//! - **Directive for a registered tool**: run it, record a step, append the
//!   output as an observation and think again.
//! - **Directive for an unknown tool**: append a "not found" observation that
//!   lists the registered tools and think again.
//! - **No directive**: the response is the final answer.
//!
//! A router error ends the task as a failure. Reaching the step limit ends it
//! as a success with a fixed message and the steps taken so far.

use jarvis_config::AgentConfig;
use jarvis_core::memory::MemoryBackend;
use jarvis_core::tool::ToolRegistry;
use jarvis_providers::{GenerateRequest, InferenceRouter};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::context::{AssemblyInput, ContextAssembler};
use crate::directive::parse_directive;
use crate::transcript::{self, Transcript};

/// Final output when the step limit is reached without an answer.
pub const STEP_LIMIT_MESSAGE: &str =
    "I reached the maximum number of steps without a final answer. Here is what I found so far.";

/// Audit entry for one iteration that invoked a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// 1-based iteration number.
    pub step: usize,
    /// The full model response that contained the directive.
    pub thought: String,
    pub tool: String,
    pub tool_input: String,
    pub tool_output: String,
}

/// How a task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    FinalAnswer,
    StepLimitReached,
    BackendFailure,
}

/// The outcome of [`ReactAgent::execute`].
#[derive(Debug, Clone, Serialize)]
pub struct TaskResult {
    pub success: bool,
    pub output: String,
    pub steps: Vec<StepRecord>,
    pub termination: Termination,
    /// Number of router calls made.
    pub iterations: usize,
}

pub struct ReactAgent {
    router: Arc<InferenceRouter>,
    tools: Arc<ToolRegistry>,
    memory: Option<Arc<dyn MemoryBackend>>,
    assembler: ContextAssembler,
    max_iterations: usize,
    temperature: f32,
    max_tokens: Option<u32>,
    recall_limit: usize,
    prefer_fast: bool,
}

impl ReactAgent {
    pub fn new(router: Arc<InferenceRouter>, tools: Arc<ToolRegistry>) -> Self {
        Self::from_config(router, tools, &AgentConfig::default())
    }

    /// Create an agent with limits and sampling taken from `[agent]` config.
    pub fn from_config(
        router: Arc<InferenceRouter>,
        tools: Arc<ToolRegistry>,
        config: &AgentConfig,
    ) -> Self {
        let assembler = match &config.persona {
            Some(persona) => ContextAssembler::new().with_persona(persona.clone()),
            None => ContextAssembler::new(),
        };
        Self {
            router,
            tools,
            memory: None,
            assembler,
            max_iterations: config.max_iterations.max(1),
            temperature: config.temperature,
            max_tokens: Some(config.max_tokens),
            recall_limit: config.recall_limit,
            prefer_fast: config.prefer_fast_backend,
        }
    }

    /// Set max iterations. Values below 1 are raised to 1.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Attach a memory backend recalled from before each task.
    pub fn with_memory(mut self, memory: Arc<dyn MemoryBackend>) -> Self {
        self.memory = Some(memory);
        self
    }

    /// How many memories to place in the initial prompt.
    pub fn with_recall_limit(mut self, limit: usize) -> Self {
        self.recall_limit = limit;
        self
    }

    /// Send every call to the fast backend regardless of routing.
    pub fn prefer_fast(mut self, prefer: bool) -> Self {
        self.prefer_fast = prefer;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Recall memories relevant to the task. Failures degrade to none.
    async fn recall_memories(&self, task: &str) -> Vec<String> {
        let Some(memory) = &self.memory else {
            return vec![];
        };
        if self.recall_limit == 0 {
            return vec![];
        }

        match memory.recall(task, self.recall_limit).await {
            Ok(snippets) => {
                if !snippets.is_empty() {
                    debug!(count = snippets.len(), "ReactAgent recalled memories");
                }
                snippets
            }
            Err(e) => {
                warn!(backend = memory.name(), "ReactAgent memory recall failed: {e}");
                vec![]
            }
        }
    }

    /// Build the initial transcript for a task.
    pub async fn initial_prompt(&self, task: &str, context: Option<&str>) -> String {
        let memories = self.recall_memories(task).await;
        let tool_listing = self.tools.describe_all();
        self.assembler.assemble(&AssemblyInput {
            task,
            context,
            tool_listing: &tool_listing,
            memories: &memories,
        })
    }

    /// Run the ReAct loop for one task.
    pub async fn execute(&self, task: &str, context: Option<&str>) -> TaskResult {
        info!(
            max_iter = self.max_iterations,
            tools = self.tools.len(),
            "ReAct loop starting"
        );

        let mut transcript = Transcript::new(self.initial_prompt(task, context).await);
        let mut steps = Vec::new();

        for iteration in 1..=self.max_iterations {
            debug!(iteration, "ReAct iteration");

            let mut request = GenerateRequest::new(transcript.render())
                .with_temperature(self.temperature)
                .force_fast(self.prefer_fast);
            if let Some(max_tokens) = self.max_tokens {
                request = request.with_max_tokens(max_tokens);
            }

            let response = match self.router.generate_text(request).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(iteration, error = %e, "ReAct loop aborted by backend failure");
                    return TaskResult {
                        success: false,
                        output: format!("An error occurred during execution: {e}"),
                        steps,
                        termination: Termination::BackendFailure,
                        iterations: iteration,
                    };
                }
            };

            let Some(directive) = parse_directive(&response) else {
                info!(iterations = iteration, steps = steps.len(), "ReAct loop completed");
                return TaskResult {
                    success: true,
                    output: response,
                    steps,
                    termination: Termination::FinalAnswer,
                    iterations: iteration,
                };
            };

            let Some(tool) = self.tools.get(&directive.tool) else {
                warn!(iteration, tool = %directive.tool, "Model asked for an unknown tool");
                let available = self.tools.names();
                transcript.push_exchange(
                    &response,
                    &transcript::tool_not_found(&directive.tool, &available),
                );
                continue;
            };

            info!(iteration, tool = %directive.tool, "Using tool");
            let output = match tool.execute(&directive.input).await {
                Ok(output) => output,
                Err(e) => {
                    debug!(tool = %directive.tool, error = %e, "Tool failed");
                    format!("Error executing tool: {e}")
                }
            };

            transcript.push_exchange(&response, &transcript::tool_output(&directive.tool, &output));
            steps.push(StepRecord {
                step: iteration,
                thought: response,
                tool: directive.tool,
                tool_input: directive.input,
                tool_output: output,
            });
        }

        warn!(
            max_iter = self.max_iterations,
            steps = steps.len(),
            "ReAct: max iterations reached"
        );
        TaskResult {
            success: true,
            output: STEP_LIMIT_MESSAGE.to_string(),
            steps,
            termination: Termination::StepLimitReached,
            iterations: self.max_iterations,
        }
    }
}
