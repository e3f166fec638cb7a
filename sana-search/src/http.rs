//! Rate-limit-aware HTTP fetching for provider requests.
//!
//! Provides a configured [`reqwest::Client`] and [`fetch_with_retry`], a
//! GET helper that honours the provider's `x-ratelimit-remaining` and
//! `retry-after` headers: 429 responses are retried after the advertised
//! delay, and an exhausted quota triggers a pre-emptive sleep so the
//! *next* request does not immediately hit the limit.

use crate::config::SearchConfig;
use crate::error::SearchError;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::time::Duration;

/// Fallback wait in seconds when a 429 carries no parseable `retry-after`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 3;

/// Build a [`reqwest::Client`] configured for provider requests.
///
/// # Errors
///
/// Returns [`SearchError::Network`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| SearchError::Network(format!("failed to build HTTP client: {e}")))
}

/// GET `url`, retrying on 429 up to `retries` times.
///
/// On success the response headers are inspected: if the remaining-quota
/// counter is present and zero and a `retry-after` duration is present,
/// the call sleeps `(retry_after + 1)` seconds *after* reading the body,
/// throttling the caller's next request rather than this one.
///
/// On a 429, the call sleeps `(retry-after, default 3) + 1` seconds and
/// tries again with one fewer retry. Any other failure, or a 429 once the
/// budget is exhausted, is returned as [`SearchError::Network`].
pub async fn fetch_with_retry(
    client: &reqwest::Client,
    url: &str,
    retries: u32,
) -> Result<String, SearchError> {
    let mut attempts_left = retries;

    loop {
        // Errors are stripped of their URL: request URLs carry the API key.
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Network(format!("request failed: {}", e.without_url())))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            if attempts_left == 0 {
                return Err(SearchError::Network(
                    "provider rate limit: retries exhausted".into(),
                ));
            }
            let wait = header_u64(response.headers(), "retry-after")
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            tracing::warn!(wait, attempts_left, "provider returned 429, retrying");
            tokio::time::sleep(Duration::from_secs(wait + 1)).await;
            attempts_left -= 1;
            continue;
        }

        let response = response
            .error_for_status()
            .map_err(|e| SearchError::Network(format!("HTTP error: {}", e.without_url())))?;

        // Capture throttle headers before the body consumes the response.
        let remaining = header_u64(response.headers(), "x-ratelimit-remaining");
        let retry_after = header_u64(response.headers(), "retry-after");

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(format!("response read failed: {}", e.without_url())))?;

        if remaining == Some(0) {
            if let Some(wait) = retry_after {
                tracing::warn!(wait, "provider quota exhausted, throttling next request");
                tokio::time::sleep(Duration::from_secs(wait + 1)).await;
            }
        }

        return Ok(body);
    }
}

/// Parse a numeric header value, returning `None` when absent or malformed.
fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
