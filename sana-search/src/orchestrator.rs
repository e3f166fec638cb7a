//! Resilient search orchestration: normalize, search, reformulate, rank.
//!
//! One call runs a small state machine: the normalized query is searched
//! first; on an empty result set each reformulation rule is tried in
//! declared order (skipping no-op rewrites and queries already attempted)
//! until one succeeds. Exhausting the rule list is not an error — the
//! caller receives an empty outcome carrying the original normalized
//! query.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::types::{Paper, SearchOutcome};
use crate::{fetch, http, query, reformulate, scoring};

/// Run the full resilient pipeline for one natural-language question.
///
/// # Errors
///
/// Only transport-level failures on the search or metadata calls
/// propagate; "no results found" is an `Ok` outcome with empty `papers`.
pub async fn resilient_search(question: &str, config: &SearchConfig) -> Result<SearchOutcome> {
    let client = http::build_client(config)?;

    let normalized = query::normalize(question);
    tracing::debug!(question, %normalized, "normalized question");

    let mut attempted = vec![normalized.clone()];
    let papers = search_and_rank(&client, &normalized, config).await?;
    if !papers.is_empty() {
        return Ok(SearchOutcome {
            query_used: normalized,
            papers,
            reformulated: None,
        });
    }

    for rule in reformulate::rules() {
        let candidate = rule.apply(&normalized);
        if candidate == normalized || attempted.contains(&candidate) {
            continue;
        }
        attempted.push(candidate.clone());

        let papers = search_and_rank(&client, &candidate, config).await?;
        if !papers.is_empty() {
            tracing::info!(from = %normalized, to = %candidate, "reformulated query succeeded");
            return Ok(SearchOutcome {
                query_used: candidate.clone(),
                papers,
                reformulated: Some(candidate),
            });
        }
    }

    tracing::debug!(%normalized, "all reformulations exhausted without results");
    Ok(SearchOutcome {
        query_used: normalized,
        papers: Vec::new(),
        reformulated: None,
    })
}

/// Run one search attempt: fetch candidates, then filter/sort/truncate.
pub(crate) async fn search_and_rank(
    client: &reqwest::Client,
    search_query: &str,
    config: &SearchConfig,
) -> Result<Vec<Paper>> {
    tracing::debug!(query = search_query, "searching literature provider");
    let candidates = fetch::fetch_documents(client, search_query, config).await?;
    Ok(scoring::rank(candidates, config.return_top_n))
}
