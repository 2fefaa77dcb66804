//! Retrying HTTP fetch with per-attempt timeout and exponential backoff.

use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};

use cardhub_core::error::{AppError, ErrorKind};
use cardhub_core::result::AppResult;

/// Retry policy for artifact fetches.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts.
    pub attempts: u32,
    /// Per-attempt timeout; the in-flight request is aborted when it
    /// elapses.
    pub timeout: Duration,
    /// Backoff before the second attempt; doubles per retry.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            timeout: Duration::from_secs(10),
            backoff_base: Duration::from_millis(500),
        }
    }
}

/// Fetch a URL, retrying transient failures.
///
/// Exhausting the retry budget propagates the last failure as a
/// terminal storage error.
pub async fn fetch_with_retry(
    http: &reqwest::Client,
    url: &str,
    policy: &RetryPolicy,
) -> AppResult<Bytes> {
    let mut last_error = None;

    for attempt in 0..policy.attempts {
        if attempt > 0 {
            let backoff = policy.backoff_base * 2u32.pow(attempt - 1);
            info!(url, attempt, backoff_ms = backoff.as_millis() as u64, "Retrying fetch");
            tokio::time::sleep(backoff).await;
        }

        match fetch_once(http, url, policy.timeout).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) => {
                warn!(url, attempt, error = %e, "Fetch attempt failed");
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| AppError::storage(format!("Fetch failed with no attempts: {url}"))))
}

async fn fetch_once(http: &reqwest::Client, url: &str, timeout: Duration) -> AppResult<Bytes> {
    let response = http
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, format!("Fetch failed: {url}"), e))?;

    if !response.status().is_success() {
        return Err(AppError::storage(format!(
            "Fetch returned HTTP {} for {url}",
            response.status()
        )));
    }

    response
        .bytes()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, format!("Fetch body failed: {url}"), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_exhausts_budget() {
        let http = reqwest::Client::new();
        let policy = RetryPolicy {
            attempts: 2,
            timeout: Duration::from_millis(200),
            backoff_base: Duration::from_millis(1),
        };
        // Reserved TEST-NET address; connection cannot succeed.
        let result = fetch_with_retry(&http, "http://192.0.2.1:9/artifact.pdf", &policy).await;
        let err = result.expect_err("fetch must fail");
        assert_eq!(err.kind, ErrorKind::Storage);
    }
}
