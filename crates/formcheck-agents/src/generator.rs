//! Text generation boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::agent::{AgentConfig, AgentError, AgentResult};

/// Opaque prompt → text service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model or backend identifier, for logging
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> AgentResult<String>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
///
/// Sends the prompt as a single user message. The whole call, including
/// reading the body, is bounded by `timeout_ms`; failures are not retried.
pub struct ChatCompletionGenerator {
    client: reqwest::Client,
    config: AgentConfig,
    api_key: Option<String>,
}

impl ChatCompletionGenerator {
    pub fn new(config: AgentConfig) -> AgentResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AgentError::LlmError(format!("failed to build HTTP client: {}", e)))?;
        let api_key = config.resolved_api_key();

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(&self, api_key: &str, prompt: &str) -> AgentResult<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::LlmError(format!("request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AgentError::RateLimit);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::LlmError(format!("HTTP {}: {}", status, body.trim())));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::LlmError(format!("malformed response: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AgentError::LlmError("response contained no message content".to_string()))
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionGenerator {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> AgentResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AgentError::NotInitialized("no API key configured".to_string()))?;

        let timeout_ms = self.config.timeout_ms;
        tokio::time::timeout(Duration::from_millis(timeout_ms), self.send(api_key, prompt))
            .await
            .map_err(|_| AgentError::Timeout(timeout_ms))?
    }
}

/// Returns the same text for every prompt
///
/// Stands in for a real model in local development.
#[derive(Debug, Clone)]
pub struct StaticGenerator {
    text: String,
}

impl StaticGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    fn model(&self) -> &str {
        "static"
    }

    async fn generate(&self, _prompt: &str) -> AgentResult<String> {
        Ok(self.text.clone())
    }
}
