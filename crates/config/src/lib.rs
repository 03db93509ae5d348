//! Configuration loading, validation, and management for Jarvis.
//!
//! Loads configuration from `~/.jarvis/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.jarvis/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reasoning loop settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Backend selection and pacing
    #[serde(default)]
    pub router: RouterConfig,

    /// The two inference backends
    #[serde(default)]
    pub backends: BackendsConfig,

    /// Long-term memory
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Built-in capabilities
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Reasoning loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum think, act, observe cycles per task
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per backend response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// How many memories to recall into the initial prompt
    #[serde(default = "default_recall_limit")]
    pub recall_limit: usize,

    /// Route every reasoning step to the fast backend
    #[serde(default)]
    pub prefer_fast_backend: bool,

    /// Replaces the opening persona line of the agent prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
}

fn default_max_iterations() -> usize {
    10
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_recall_limit() -> usize {
    3
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            recall_limit: default_recall_limit(),
            prefer_fast_backend: false,
            persona: None,
        }
    }
}

/// Inference router configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Messages longer than this many characters go to the capable backend
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: usize,

    /// Keywords that mark a message as analytical/planning work
    #[serde(default = "default_complex_keywords")]
    pub complex_keywords: Vec<String>,

    /// Minimum spacing between any two backend calls
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Prior turns forwarded with a chat message
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_complexity_threshold() -> usize {
    300
}
fn default_complex_keywords() -> Vec<String> {
    [
        "plan",
        "strategy",
        "analyze",
        "compare",
        "reason",
        "design",
        "architecture",
        "evaluate",
        "critique",
        "complex",
        "step by step",
        "explain in detail",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_min_delay_ms() -> u64 {
    500
}
fn default_max_history() -> usize {
    10
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: default_complexity_threshold(),
            complex_keywords: default_complex_keywords(),
            min_delay_ms: default_min_delay_ms(),
            max_history: default_max_history(),
        }
    }
}

/// The fast/local and capable/remote backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendsConfig {
    #[serde(default = "default_fast_backend")]
    pub fast: BackendConfig,

    #[serde(default = "default_capable_backend")]
    pub capable: BackendConfig,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            fast: default_fast_backend(),
            capable: default_capable_backend(),
        }
    }
}

/// One OpenAI-compatible backend endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Display name used in logs
    pub name: String,

    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub api_url: String,

    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Whether the backend needs an API key to be usable
    #[serde(default)]
    pub requires_key: bool,
}

impl BackendConfig {
    /// A backend is usable when it has a key or does not need one.
    pub fn is_enabled(&self) -> bool {
        !self.requires_key || self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn default_fast_backend() -> BackendConfig {
    BackendConfig {
        name: "ollama".into(),
        api_url: "http://localhost:11434/v1".into(),
        model: "qwen2.5-coder:3b".into(),
        api_key: None,
        requires_key: false,
    }
}

fn default_capable_backend() -> BackendConfig {
    BackendConfig {
        name: "gemini".into(),
        api_url: "https://generativelanguage.googleapis.com/v1beta/openai".into(),
        model: "gemini-2.0-flash-exp".into(),
        api_key: None,
        requires_key: true,
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &redact(&self.api_key))
            .field("requires_key", &self.requires_key)
            .finish()
    }
}

/// Which long-term memory store to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryBackendKind {
    /// JSONL file on disk
    File,
    /// Process-local, lost on exit
    InMemory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_backend")]
    pub backend: MemoryBackendKind,

    /// Location of the JSONL store (file backend only)
    #[serde(default = "default_memory_path")]
    pub path: PathBuf,
}

fn default_memory_backend() -> MemoryBackendKind {
    MemoryBackendKind::File
}
fn default_memory_path() -> PathBuf {
    AppConfig::config_dir().join("memory").join("memories.jsonl")
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backend: default_memory_backend(),
            path: default_memory_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Sandbox directory for the file capabilities
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,
}

fn default_workspace() -> PathBuf {
    AppConfig::workspace_dir()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            workspace: default_workspace(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.jarvis/config.toml),
    /// then apply environment variable overrides:
    /// - `OLLAMA_BASE_URL`, `OLLAMA_MODEL` for the fast backend
    /// - `GEMINI_API_KEY` for the capable backend
    /// - `MAX_ITERATIONS` for the reasoning loop
    /// - `JARVIS_WORKSPACE` for the file sandbox
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`AppConfig::load`]).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("OLLAMA_BASE_URL") {
            self.backends.fast.api_url = ollama_api_url(&url);
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.backends.fast.model = model;
        }
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.is_empty()) {
            self.backends.capable.api_key = Some(key);
        }
        if let Some(raw) = lookup("MAX_ITERATIONS") {
            self.agent.max_iterations = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("MAX_ITERATIONS must be a positive integer, got '{raw}'"))
            })?;
        }
        if let Some(dir) = lookup("JARVIS_WORKSPACE") {
            self.tools.workspace = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".jarvis")
    }

    /// Get the default workspace directory path.
    pub fn workspace_dir() -> PathBuf {
        Self::config_dir().join("workspace")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.temperature < 0.0 || self.agent.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "agent.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }

        if self.router.complexity_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "router.complexity_threshold must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Ollama's OpenAI-compatible API lives under `/v1`.
fn ollama_api_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with("/v1") {
        base.to_string()
    } else {
        format!("{base}/v1")
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
