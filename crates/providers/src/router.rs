//! Inference router: picks the fast or capable backend for each request,
//! paces calls process-wide, and falls back when a backend fails.

use std::sync::Arc;
use std::time::Duration;

use jarvis_config::AppConfig;
use jarvis_core::error::ProviderError;
use jarvis_core::message::{Message, recent_window};
use jarvis_core::provider::{Provider, ProviderRequest};
use tracing::{info, warn};

use crate::openai_compat::OpenAiCompatProvider;
use crate::rate_limit::RateLimiter;
use crate::routing::{BackendKind, RouteReason, RoutingPolicy};
use crate::text_stream::TextStream;

/// Returned as a successful answer when the fast backend fails and there is
/// nothing left to fall back to.
pub const APOLOGY: &str =
    "I apologize, but I'm having trouble processing your request locally.";

/// One call to [`InferenceRouter::generate`].
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub message: String,
    pub system_prompt: Option<String>,
    pub history: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub stream: bool,
    pub force_fast: bool,
}

impl GenerateRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            system_prompt: None,
            history: Vec::new(),
            temperature: 0.7,
            max_tokens: None,
            stream: false,
            force_fast: false,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn force_fast(mut self, force_fast: bool) -> Self {
        self.force_fast = force_fast;
        self
    }
}

/// A generated answer: one string, or fragments to be consumed lazily.
pub enum Generation {
    Text(String),
    Stream(TextStream),
}

impl Generation {
    /// Resolve to the full text, draining the stream if there is one.
    pub async fn into_text(self) -> Result<String, ProviderError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Stream(stream) => stream.collect_text().await,
        }
    }
}

impl std::fmt::Debug for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Routes each request to one of two backends.
pub struct InferenceRouter {
    fast: Arc<dyn Provider>,
    capable: Option<Arc<dyn Provider>>,
    policy: RoutingPolicy,
    limiter: RateLimiter,
    max_history: usize,
}

impl InferenceRouter {
    /// A router with only a fast backend. Everything routes there.
    pub fn new(fast: Arc<dyn Provider>) -> Self {
        Self {
            fast,
            capable: None,
            policy: RoutingPolicy::default(),
            limiter: RateLimiter::new(Duration::from_millis(500)),
            max_history: 10,
        }
    }

    pub fn with_capable(mut self, capable: Arc<dyn Provider>) -> Self {
        self.capable = Some(capable);
        self
    }

    pub fn with_policy(mut self, policy: RoutingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.limiter = RateLimiter::new(min_delay);
        self
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn has_capable(&self) -> bool {
        self.capable.is_some()
    }

    /// The backend a message would be sent to, and why.
    ///
    /// Without a capable backend every message routes fast.
    pub fn route(&self, message: &str, force_fast: bool) -> (BackendKind, RouteReason) {
        let (kind, reason) = self.policy.explain(message, force_fast);
        if kind == BackendKind::Capable && self.capable.is_none() {
            return (BackendKind::Fast, reason);
        }
        (kind, reason)
    }

    fn backend(&self, kind: BackendKind) -> Option<&Arc<dyn Provider>> {
        match kind {
            BackendKind::Fast => Some(&self.fast),
            BackendKind::Capable => self.capable.as_ref(),
        }
    }

    fn build_request(&self, request: &GenerateRequest) -> ProviderRequest {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        if let Some(system) = &request.system_prompt {
            messages.push(Message::system(system.clone()));
        }
        messages.extend(recent_window(&request.history, self.max_history).iter().cloned());
        messages.push(Message::user(request.message.clone()));

        ProviderRequest {
            model: String::new(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: request.stream,
        }
    }

    async fn call(
        provider: &dyn Provider,
        request: ProviderRequest,
    ) -> Result<Generation, ProviderError> {
        if request.stream {
            let rx = provider.stream(request).await?;
            Ok(Generation::Stream(TextStream::new(rx)))
        } else {
            let response = provider.complete(request).await?;
            Ok(Generation::Text(response.message.content))
        }
    }

    /// Generate a response.
    ///
    /// Failure policy:
    /// - capable fails: retry once on fast; success is returned as a
    ///   (degraded) success, a second failure is returned as `Err`
    /// - fast selected and fails: [`APOLOGY`] is returned as a success
    pub async fn generate(&self, request: GenerateRequest) -> Result<Generation, ProviderError> {
        let (kind, reason) = self.route(&request.message, request.force_fast);
        let provider_request = self.build_request(&request);

        self.limiter.acquire().await;
        let result = self.dispatch(kind, &reason, provider_request).await;
        self.limiter.touch().await;
        result
    }

    async fn dispatch(
        &self,
        kind: BackendKind,
        reason: &RouteReason,
        request: ProviderRequest,
    ) -> Result<Generation, ProviderError> {
        let Some(selected) = self.backend(kind) else {
            return Err(ProviderError::NotConfigured(format!("{kind} backend")));
        };
        info!(backend = %kind, provider = selected.name(), reason = %reason, "Routing request");

        match Self::call(selected.as_ref(), request.clone()).await {
            Ok(generation) => Ok(generation),
            Err(e) if kind == BackendKind::Fast => {
                warn!(provider = self.fast.name(), error = %e, "Fast backend failed, no fallback left");
                Ok(Generation::Text(APOLOGY.to_string()))
            }
            Err(e) => {
                warn!(
                    provider = selected.name(),
                    error = %e,
                    fallback = self.fast.name(),
                    "Capable backend failed, serving degraded response from fast backend"
                );
                Self::call(self.fast.as_ref(), request).await
            }
        }
    }

    /// Complete a request and return the whole text.
    pub async fn generate_text(&self, request: GenerateRequest) -> Result<String, ProviderError> {
        self.generate(request.streaming(false)).await?.into_text().await
    }

    /// Health of each configured backend.
    pub async fn health(&self) -> Vec<(BackendKind, String, Result<bool, ProviderError>)> {
        let mut report = vec![(
            BackendKind::Fast,
            self.fast.name().to_string(),
            self.fast.health_check().await,
        )];
        if let Some(capable) = &self.capable {
            report.push((
                BackendKind::Capable,
                capable.name().to_string(),
                capable.health_check().await,
            ));
        }
        report
    }
}

/// Build the router from configuration.
///
/// The capable backend is only wired in when it has the key it needs.
pub fn build_from_config(config: &AppConfig) -> InferenceRouter {
    let fast_cfg = &config.backends.fast;
    let fast = Arc::new(OpenAiCompatProvider::new(
        fast_cfg.name.clone(),
        fast_cfg.api_url.clone(),
        fast_cfg.api_key.clone().unwrap_or_else(|| fast_cfg.name.clone()),
        fast_cfg.model.clone(),
    ));

    let mut router = InferenceRouter::new(fast)
        .with_policy(RoutingPolicy::from_config(&config.router))
        .with_min_delay(Duration::from_millis(config.router.min_delay_ms))
        .with_max_history(config.router.max_history);

    let capable_cfg = &config.backends.capable;
    if capable_cfg.is_enabled() {
        router = router.with_capable(Arc::new(OpenAiCompatProvider::new(
            capable_cfg.name.clone(),
            capable_cfg.api_url.clone(),
            capable_cfg.api_key.clone().unwrap_or_default(),
            capable_cfg.model.clone(),
        )));
    } else {
        info!(backend = %capable_cfg.name, "Capable backend disabled (no API key), using fast backend only");
    }

    router
}
