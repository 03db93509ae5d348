//! Shared test helpers for pattern tests.

use jarvis_core::error::{MemoryError, ProviderError, ToolError};
use jarvis_core::memory::{MemoryBackend, MemoryEntry, MemoryQuery};
use jarvis_core::message::Message;
use jarvis_core::provider::{Provider, ProviderRequest, ProviderResponse};
use jarvis_core::tool::{Tool, ToolRegistry};
use jarvis_providers::InferenceRouter;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A mock backend that replays a script of outcomes, one per call.
///
/// Once the script runs out, the last entry is repeated. An empty script
/// always fails.
pub struct ScriptedProvider {
    script: Vec<Result<String, ProviderError>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn failing() -> Self {
        Self::new(vec![Err(ProviderError::Network("connection refused".into()))])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The user message of every request, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.messages.last().map(|m| m.content.clone()))
            .collect()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len() - 1
        };
        let outcome = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::NotConfigured("empty script".into())));
        outcome.map(|text| ProviderResponse {
            message: Message::assistant(text),
            usage: None,
            model: "scripted".into(),
        })
    }
}

/// Router over a single fast backend with no pacing.
pub fn fast_router(provider: Arc<ScriptedProvider>) -> Arc<InferenceRouter> {
    Arc::new(InferenceRouter::new(provider).with_min_delay(Duration::ZERO))
}

/// Router where both backends are configured.
pub fn dual_router(
    fast: Arc<ScriptedProvider>,
    capable: Arc<ScriptedProvider>,
) -> Arc<InferenceRouter> {
    Arc::new(
        InferenceRouter::new(fast)
            .with_capable(capable)
            .with_min_delay(Duration::ZERO),
    )
}

/// Tool that always fails.
pub struct BrokenTool;

#[async_trait::async_trait]
impl Tool for BrokenTool {
    fn name(&self) -> &str {
        "broken"
    }

    fn description(&self) -> &str {
        "Always fails."
    }

    async fn execute(&self, _input: &str) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: "broken".into(),
            reason: "disk on fire".into(),
        })
    }
}

/// Tool that echoes its input.
pub struct EchoTool;

#[async_trait::async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo the input back."
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        Ok(input.to_string())
    }
}

pub fn registry(tools: Vec<Box<dyn Tool>>) -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool).unwrap();
    }
    Arc::new(registry)
}

/// Memory backend whose every operation fails.
pub struct BrokenMemory;

#[async_trait::async_trait]
impl MemoryBackend for BrokenMemory {
    fn name(&self) -> &str {
        "broken"
    }

    async fn store(&self, _entry: MemoryEntry) -> Result<String, MemoryError> {
        Err(MemoryError::Storage("read-only".into()))
    }

    async fn search(&self, _query: MemoryQuery) -> Result<Vec<MemoryEntry>, MemoryError> {
        Err(MemoryError::QueryFailed("index missing".into()))
    }

    async fn delete(&self, _id: &str) -> Result<bool, MemoryError> {
        Err(MemoryError::Storage("read-only".into()))
    }

    async fn count(&self) -> Result<usize, MemoryError> {
        Err(MemoryError::QueryFailed("index missing".into()))
    }
}
