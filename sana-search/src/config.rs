//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] gathers every tunable of the retrieval pipeline
//! (provider endpoint, batch sizes, concurrency caps, retry budget) so
//! there is no hidden process-wide state and tests can run with small
//! values against a mock provider.

use crate::error::SearchError;

/// Configuration for a literature search operation.
///
/// Use [`Default::default()`] for values tuned to the real provider's
/// published rate limits, or construct with field overrides for custom
/// behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Provider endpoint root (no trailing slash). Points at the live
    /// E-utilities service by default; tests point it at a mock server.
    pub base_url: String,
    /// Provider API key. Empty string is accepted but lowers the
    /// provider-side rate limit.
    pub api_key: String,
    /// Maximum number of document identifiers requested from the search
    /// endpoint.
    pub max_results: usize,
    /// Number of top-scored papers returned to the caller.
    pub return_top_n: usize,
    /// How many identifiers go into one metadata batch request.
    pub summary_chunk_size: usize,
    /// Maximum simultaneous in-flight detail fetches.
    pub fetch_concurrency: usize,
    /// Retry budget for a single request answered with 429.
    pub retry_attempts: u32,
    /// Fixed delay between metadata batch requests, in milliseconds,
    /// enforced regardless of observed rate-limit headers.
    pub batch_delay_ms: u64,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: crate::entrez::DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            max_results: 20,
            return_top_n: 5,
            summary_chunk_size: 10,
            fetch_concurrency: 3,
            retry_attempts: 3,
            batch_delay_ms: 1200,
            timeout_seconds: 30,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must not be empty
    /// - `max_results`, `return_top_n`, `summary_chunk_size`, and
    ///   `fetch_concurrency` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.base_url.is_empty() {
            return Err(SearchError::Config("base_url must not be empty".into()));
        }
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.return_top_n == 0 {
            return Err(SearchError::Config(
                "return_top_n must be greater than 0".into(),
            ));
        }
        if self.summary_chunk_size == 0 {
            return Err(SearchError::Config(
                "summary_chunk_size must be greater than 0".into(),
            ));
        }
        if self.fetch_concurrency == 0 {
            return Err(SearchError::Config(
                "fetch_concurrency must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
