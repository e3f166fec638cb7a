//! Non-streaming chat client for an OpenAI-compatible API.
//!
//! Both agents (question decomposition and evidence summarization) talk
//! to the text-generation provider through this one client. Any server
//! exposing `/v1/chat/completions` works: OpenAI, OpenRouter, Ollama, a
//! local llama.cpp server, etc.

use crate::config::LlmConfig;
use crate::error::{AgentError, Result};
use std::time::Duration;

/// Per-request timeout. Generation can be slow; this only bounds hangs.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// A single role-tagged message in a chat request.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// `"system"` or `"user"`.
    pub role: &'static str,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Chat completions client.
pub struct ChatClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl ChatClient {
    /// Create a client from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Llm`] if the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AgentError::Llm(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Send a completion request and return the generated text.
    ///
    /// `max_tokens` caps the output when set; decomposition runs
    /// unbounded, summaries use the configured budget.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Llm`] on transport failure, a non-success
    /// status, or a response without message content.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: Option<u32>,
    ) -> Result<String> {
        let body = build_request_body(&self.config, messages, max_tokens);
        let url = completions_url(&self.config.api_url);

        let mut request = self.http.post(&url).json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentError::Llm(format!("API request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AgentError::Llm(format!("API error: {e}")))?;

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AgentError::Llm(format!("response parse failed: {e}")))?;

        value["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| AgentError::Llm("response missing message content".into()))
    }
}

/// Build the chat completions endpoint URL from the configured base.
///
/// Accepts bases with or without a trailing `/v1` or slash.
fn completions_url(api_url: &str) -> String {
    let base = api_url.strip_suffix("/v1").unwrap_or(api_url);
    let base = base.trim_end_matches('/');
    format!("{base}/v1/chat/completions")
}

/// Build the OpenAI-compatible JSON request body.
fn build_request_body(
    config: &LlmConfig,
    messages: &[ChatMessage],
    max_tokens: Option<u32>,
) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = messages
        .iter()
        .map(|m| {
            serde_json::json!({
                "role": m.role,
                "content": m.content,
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "model": config.api_model,
        "messages": messages,
        "temperature": config.temperature,
    });
    if let Some(max) = max_tokens {
        body["max_tokens"] = serde_json::json!(max);
    }
    body
}
