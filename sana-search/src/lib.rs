//! # sana-search
//!
//! Resilient peer-reviewed literature retrieval for Sana.
//!
//! This crate turns a free-text health/nutrition question into a small,
//! ranked set of bibliographic records from the public literature
//! provider. It is the one algorithmically interesting piece of the
//! system: everything above it is a thin wrapper over a text-generation
//! service.
//!
//! ## Design
//!
//! - Normalizes questions into compact provider queries (stopword and
//!   filler removal, two composed passes)
//! - Retries zero-result searches through an ordered table of
//!   scientific-terminology rewrites, deduplicated against the call's
//!   attempt history
//! - Fetches metadata in fixed-size batches with a fixed inter-batch
//!   delay, and abstracts with bounded concurrency, honouring the
//!   provider's rate-limit headers
//! - Scores candidates with a deterministic integer formula and returns
//!   the stable-sorted top N
//!
//! ## Security
//!
//! - The provider API key only ever appears in request URLs, never in
//!   errors or logs
//! - Queries are logged at debug level only
//! - No network listeners; this is a library, not a server

pub mod config;
pub mod entrez;
pub mod error;
pub mod fetch;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod reformulate;
pub mod scoring;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use types::{Paper, PaperKind, SearchOutcome};

/// Answer a natural-language question with ranked literature.
///
/// Normalizes the question, searches the provider, and retries each
/// reformulation rule in order when the first attempt yields nothing.
/// "No results anywhere" is a normal outcome with empty `papers`, not an
/// error.
///
/// # Errors
///
/// Returns [`SearchError::Config`] when `config` is invalid, and
/// [`SearchError::Network`]/[`SearchError::Parse`] only for
/// transport-level failures on the search or metadata calls.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> sana_search::Result<()> {
/// let config = sana_search::SearchConfig::default();
/// let outcome = sana_search::resilient_search("Is creatine safe?", &config).await?;
/// for paper in &outcome.papers {
///     println!("[{}] {}", paper.score, paper.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn resilient_search(question: &str, config: &SearchConfig) -> Result<SearchOutcome> {
    config.validate()?;
    orchestrator::resilient_search(question, config).await
}

/// Run a single already-normalized query against the provider, without
/// reformulation fallbacks.
///
/// Returns the filtered, score-ranked top N papers; an empty vector when
/// the provider has nothing for this query.
///
/// # Errors
///
/// Same as [`resilient_search`].
pub async fn search(search_query: &str, config: &SearchConfig) -> Result<Vec<Paper>> {
    config.validate()?;
    let client = http::build_client(config)?;
    orchestrator::search_and_rank(&client, search_query, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resilient_search_validates_config() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let result = resilient_search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_results"));
    }

    #[tokio::test]
    async fn search_validates_config() {
        let config = SearchConfig {
            base_url: String::new(),
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base_url"));
    }
}
