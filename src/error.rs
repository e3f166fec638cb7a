//! Error types for the sana service layer.

/// Top-level error type for the research-assistant service.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Text-generation provider request or response error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Literature retrieval error.
    #[error("search error: {0}")]
    Search(#[from] sana_search::SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AgentError>;
