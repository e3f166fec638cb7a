//! Error types for the sana-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Rate limiting is recovered inside the fetch
//! utility and never surfaces here; an empty result set is a value, not
//! an error.

/// Errors that can occur during literature retrieval.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Transport or HTTP failure, including a 429 with retries exhausted.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse a provider response payload.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for sana-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
