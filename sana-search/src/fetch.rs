//! Document batch fetcher: identifiers → metadata → abstracts → papers.
//!
//! Three provider stages per query:
//!
//! 1. Search: resolve the query to an ordered identifier list (one call).
//! 2. Summaries: metadata for all identifiers in fixed-size batches, one
//!    request per batch with a fixed inter-batch delay.
//! 3. Details: per-identifier abstract fetch with bounded concurrency.
//!
//! Search and summary failures abort the whole query; a detail failure
//! only degrades that one document (empty abstract, score 0). Results are
//! collected in identifier order, so ranking never depends on fetch
//! completion order.

use crate::config::SearchConfig;
use crate::entrez::{self, DocSummary};
use crate::error::Result;
use crate::http;
use crate::scoring;
use crate::types::Paper;
use futures::StreamExt;
use std::collections::HashMap;
use std::time::Duration;

/// Fetch and score every candidate document for `query`.
///
/// Returns the unranked candidate list; the caller applies
/// [`crate::scoring::rank`]. An empty identifier list short-circuits with
/// no further provider calls.
///
/// # Errors
///
/// Returns [`crate::error::SearchError::Network`] or
/// [`crate::error::SearchError::Parse`] when the search or a summary
/// batch fails; detail failures are absorbed per document.
pub async fn fetch_documents(
    client: &reqwest::Client,
    query: &str,
    config: &SearchConfig,
) -> Result<Vec<Paper>> {
    let body = http::fetch_with_retry(
        client,
        &entrez::search_url(config, query),
        config.retry_attempts,
    )
    .await?;
    let ids = entrez::parse_search_ids(&body)?;

    if ids.is_empty() {
        tracing::debug!(query, "provider search returned no identifiers");
        return Ok(Vec::new());
    }
    tracing::debug!(query, count = ids.len(), "provider search returned identifiers");

    let summaries = fetch_summaries(client, &ids, config).await?;
    Ok(fetch_details(client, &ids, &summaries, query, config).await)
}

/// Fetch metadata for all identifiers in `summary_chunk_size` batches,
/// merging into one id → summary map. A fixed delay follows every batch
/// regardless of observed rate-limit headers.
async fn fetch_summaries(
    client: &reqwest::Client,
    ids: &[String],
    config: &SearchConfig,
) -> Result<HashMap<String, DocSummary>> {
    let mut merged = HashMap::new();
    for chunk in ids.chunks(config.summary_chunk_size) {
        let body = http::fetch_with_retry(
            client,
            &entrez::summary_url(config, chunk),
            config.retry_attempts,
        )
        .await?;
        merged.extend(entrez::parse_summaries(&body)?);
        tokio::time::sleep(Duration::from_millis(config.batch_delay_ms)).await;
    }
    Ok(merged)
}

/// Fetch per-identifier details with at most `fetch_concurrency` requests
/// in flight. The buffered stream yields results in submission order.
async fn fetch_details(
    client: &reqwest::Client,
    ids: &[String],
    summaries: &HashMap<String, DocSummary>,
    query: &str,
    config: &SearchConfig,
) -> Vec<Paper> {
    futures::stream::iter(
        ids.iter()
            .cloned()
            .map(|id| async move { fetch_one(client, &id, summaries, query, config).await }),
    )
    .buffered(config.fetch_concurrency)
    .collect()
    .await
}

/// Fetch, extract, classify, and score a single document.
///
/// A failed detail fetch yields a degraded paper: the summary title,
/// empty abstract, score 0. It is filtered out during ranking.
async fn fetch_one(
    client: &reqwest::Client,
    id: &str,
    summaries: &HashMap<String, DocSummary>,
    query: &str,
    config: &SearchConfig,
) -> Paper {
    let summary = summaries.get(id).cloned().unwrap_or_default();

    let xml = match http::fetch_with_retry(
        client,
        &entrez::detail_url(config, id),
        config.retry_attempts,
    )
    .await
    {
        Ok(xml) => xml,
        Err(err) => {
            tracing::warn!(id, error = %err, "detail fetch failed, degrading document");
            return Paper {
                id: id.to_owned(),
                title: summary.title,
                abstract_text: String::new(),
                year: 1900,
                venue: String::new(),
                kind: crate::types::PaperKind::Normal,
                score: 0,
                url: entrez::article_url(id),
            };
        }
    };

    let title = entrez::decode_entities(&summary.title);
    let abstract_text = entrez::decode_entities(&entrez::extract_abstract(&xml));
    let year = entrez::parse_year(&summary.pubdate);
    let venue = summary.source;
    let kind = scoring::classify_kind(&title, &abstract_text);
    let score = scoring::compute_score(query, &abstract_text, year, &venue, kind);

    Paper {
        id: id.to_owned(),
        title,
        abstract_text,
        year,
        venue,
        kind,
        score,
        url: entrez::article_url(id),
    }
}
