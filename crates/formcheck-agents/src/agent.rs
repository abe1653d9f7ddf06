//! Base agent trait and common types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Agent error types
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("LLM inference error: {0}")]
    LlmError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Agent not initialized: {0}")]
    NotInitialized(String),
}

impl From<AgentError> for formcheck_core::Error {
    fn from(e: AgentError) -> Self {
        match e {
            AgentError::Timeout(duration_ms) => formcheck_core::Error::Timeout { duration_ms },
            other => formcheck_core::Error::Generation(other.to_string()),
        }
    }
}

/// Base trait for all agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent name/identifier
    fn name(&self) -> &str;

    /// Process input and generate output
    async fn process(&self, input: &str) -> AgentResult<String>;

    /// Optional: validate input before processing
    fn validate_input(&self, input: &str) -> AgentResult<()> {
        if input.trim().is_empty() {
            Err(AgentError::InvalidInput("Empty input".to_string()))
        } else {
            Ok(())
        }
    }

    /// Optional: post-process output
    fn post_process(&self, output: String) -> AgentResult<String> {
        Ok(output)
    }
}

/// Text generation settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model to use (e.g., "gpt-4o")
    pub model: String,
    /// Temperature for generation (0.0-2.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Timeout in milliseconds for one generation call
    pub timeout_ms: u64,
    /// OpenAI-compatible API root
    pub base_url: String,
    /// Bearer token; falls back to `OPENAI_API_KEY` when unset
    pub api_key: Option<String>,
}

impl AgentConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 256,
            timeout_ms: 30_000,
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
        }
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_ms", &self.timeout_ms)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
