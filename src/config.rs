//! Configuration for the sana service.
//!
//! Loaded from a TOML file with every field defaulted, then overridden by
//! the conventional environment variables (`OPENAI_API_KEY`,
//! `PUBMED_API_KEY`) so credentials never need to live in the file.

use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Text-generation provider settings.
    pub llm: LlmConfig,
    /// Literature provider settings.
    pub search: SearchSettings,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the service binds to.
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_owned(),
        }
    }
}

/// Text-generation provider configuration (OpenAI-compatible API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the chat completions API, including `/v1`.
    pub api_url: String,
    /// Model identifier sent with every request.
    pub api_model: String,
    /// Bearer token; empty disables the Authorization header.
    pub api_key: String,
    /// Sampling temperature for both agents.
    pub temperature: f32,
    /// Output token budget for evidence summaries.
    pub summary_max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_owned(),
            api_model: "gpt-4o".to_owned(),
            api_key: String::new(),
            temperature: 0.3,
            summary_max_tokens: 900,
        }
    }
}

/// Literature provider settings.
///
/// Only the credential is service-level configuration; the pipeline
/// tunables live in [`sana_search::SearchConfig`] defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Provider API key. Empty is accepted but lowers the provider-side
    /// rate limit.
    pub api_key: String,
}

impl SearchSettings {
    /// Build the retrieval pipeline configuration from these settings.
    pub fn to_search_config(&self) -> sana_search::SearchConfig {
        sana_search::SearchConfig {
            api_key: self.api_key.clone(),
            ..Default::default()
        }
    }
}

impl AppConfig {
    /// Read configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Io`] when the file cannot be read and
    /// [`AgentError::Config`] when it does not parse.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AgentError::Config(e.to_string()))
    }

    /// Load configuration, then apply environment overrides.
    ///
    /// With no path the defaults are used. `OPENAI_API_KEY` and
    /// `PUBMED_API_KEY` override the file's credentials when set and
    /// non-empty.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => Self::default(),
        };
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                config.llm.api_key = key;
            }
        }
        if let Ok(key) = std::env::var("PUBMED_API_KEY") {
            if !key.is_empty() {
                config.search.api_key = key;
            }
        }
        Ok(config)
    }
}
