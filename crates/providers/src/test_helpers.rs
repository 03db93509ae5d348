//! Shared test helpers for router tests.

use jarvis_core::error::ProviderError;
use jarvis_core::message::Message;
use jarvis_core::provider::{Provider, ProviderRequest, ProviderResponse};
use std::sync::Mutex;

/// A mock backend that replays a script of outcomes, one per call, and
/// records every request it receives.
///
/// Calls past the end of the script fail with an `ApiError`.
pub struct ScriptedProvider {
    name: String,
    script: Mutex<Vec<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(name: &str, script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            name: name.to_string(),
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len() - 1
        };

        let script = self.script.lock().unwrap();
        match script.get(index) {
            Some(Ok(text)) => Ok(ProviderResponse {
                message: Message::assistant(text.clone()),
                usage: None,
                model: "scripted".into(),
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("{}: script exhausted at call #{}", self.name, index + 1),
            }),
        }
    }
}
