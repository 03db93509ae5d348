//! Notify tool: posts a message to a webhook in the background.
//!
//! The send runs on its own task; the tool answers immediately with a
//! "queued" acknowledgement so the reasoning loop never waits on delivery.

use async_trait::async_trait;
use jarvis_core::error::ToolError;
use jarvis_core::tool::Tool;
use std::time::Duration;
use tracing::{info, warn};

pub struct NotifyTool {
    client: reqwest::Client,
}

impl NotifyTool {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for NotifyTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `url|message` and validate both halves.
fn parse_input(input: &str) -> Result<(&str, &str), ToolError> {
    let (url, message) = input
        .split_once('|')
        .ok_or_else(|| ToolError::InvalidArguments("Input format must be 'url|message'".into()))?;
    let url = url.trim();
    let message = message.trim();

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ToolError::InvalidArguments(format!(
            "Webhook URL must start with http:// or https://, got '{url}'"
        )));
    }
    if message.is_empty() {
        return Err(ToolError::InvalidArguments("Message is empty".into()));
    }
    Ok((url, message))
}

#[async_trait]
impl Tool for NotifyTool {
    fn name(&self) -> &str {
        "notify"
    }

    fn description(&self) -> &str {
        "Send a notification to a webhook. Input format: 'url|message'"
    }

    async fn execute(&self, input: &str) -> Result<String, ToolError> {
        let (url, message) = parse_input(input)?;
        let url = url.to_string();
        let body = serde_json::json!({ "text": message });
        let client = self.client.clone();

        let target = url.clone();
        tokio::spawn(async move {
            match client.post(&target).json(&body).send().await {
                Ok(resp) if resp.status().is_success() => {
                    info!(url = %target, "Notification delivered");
                }
                Ok(resp) => {
                    warn!(url = %target, status = resp.status().as_u16(), "Notification rejected");
                }
                Err(e) => {
                    warn!(url = %target, error = %e, "Notification failed");
                }
            }
        });

        Ok(format!("Queued notification to {url}"))
    }
}
