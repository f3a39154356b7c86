//! Shared HTTP request plumbing for the management and token endpoints.
//!
//! One execution path for every request: send, classify transient failures
//! (timeouts, connection errors, 429, 5xx), log, and read the body. The retry
//! wrapper re-sends only transient classes with exponential backoff; business
//! errors (auth failures, missing record sets) are never retried.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::{ProviderError, Result};

/// Connect timeout applied to the shared client (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Per-request timeout applied to the shared client (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Retries after the first attempt; total attempts = this + 1.
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 2;

/// Maximum number of characters of a response body to include in debug logs.
const TRUNCATE_LIMIT: usize = 256;

/// Create the HTTP client with timeout configuration.
///
/// Every request through this client is bounded by the request timeout, so no
/// operation can hang its caller.
pub(crate) fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// [`TRUNCATE_LIMIT`] characters with a suffix indicating the total length.
pub(crate) fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// MSRV-compatible replacement for `str::floor_char_boundary`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Performs an HTTP request and returns the status code and response text.
///
/// Timeouts and transport failures become [`ProviderError::Timeout`] /
/// [`ProviderError::NetworkError`]; HTTP 429 becomes
/// [`ProviderError::RateLimited`] (carrying the `Retry-After` hint) and any
/// 5xx becomes [`ProviderError::ServerError`]. Everything else is returned to
/// the caller for operation-specific handling.
pub(crate) async fn execute_request(
    request_builder: RequestBuilder,
    method_name: &str,
    url_or_action: &str,
) -> Result<(u16, String)> {
    log::debug!("{method_name} {url_or_action}");

    let response = request_builder.send().await.map_err(|e| {
        if e.is_timeout() {
            ProviderError::Timeout {
                detail: e.to_string(),
            }
        } else {
            ProviderError::NetworkError {
                detail: e.to_string(),
            }
        }
    })?;

    let status_code = response.status().as_u16();
    log::debug!("Response Status: {status_code}");

    // Extract Retry-After header (before consuming the response body)
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if status_code == 429 {
        let body = response.text().await.unwrap_or_default();
        log::warn!("Rate limited (HTTP 429), retry_after={retry_after:?}");
        return Err(ProviderError::RateLimited {
            retry_after,
            raw_message: Some(body),
        });
    }

    if (500..=599).contains(&status_code) {
        let body = response.text().await.unwrap_or_default();
        log::warn!("Server error (HTTP {status_code})");
        return Err(ProviderError::ServerError {
            status: status_code,
            raw_message: if body.is_empty() { None } else { Some(body) },
        });
    }

    let response_text = response
        .text()
        .await
        .map_err(|e| ProviderError::NetworkError {
            detail: format!("Failed to read response body: {e}"),
        })?;

    log::debug!("Response Body: {}", truncate_for_log(&response_text));

    Ok((status_code, response_text))
}

/// Performs an HTTP request with bounded retries.
///
/// Only transient errors are retried (see [`is_retryable`]); the last error is
/// surfaced once `max_retries` is exhausted.
pub(crate) async fn execute_request_with_retry(
    request_builder: RequestBuilder,
    method_name: &str,
    url_or_action: &str,
    max_retries: u32,
) -> Result<(u16, String)> {
    if max_retries == 0 {
        return execute_request(request_builder, method_name, url_or_action).await;
    }

    let mut last_error = None;

    for attempt in 0..=max_retries {
        // RequestBuilder can only be consumed once; clone per attempt.
        let Some(req) = request_builder.try_clone() else {
            log::warn!("Cannot clone request, disabling retry");
            return execute_request(request_builder, method_name, url_or_action).await;
        };

        match execute_request(req, method_name, url_or_action).await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < max_retries && is_retryable(&e) => {
                let delay = retry_delay(&e, attempt);
                log::warn!(
                    "Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                    attempt + 1,
                    max_retries,
                    delay.as_secs_f32(),
                    e
                );
                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
        detail: "All retries exhausted with no error captured".to_string(),
    }))
}

/// Whether the error may succeed on retry.
///
/// Network failures, timeouts, rate limiting, and 5xx answers qualify;
/// business errors (auth failures, missing record sets) never do.
fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
            | ProviderError::ServerError { .. }
    )
}

/// Delay before the next attempt.
///
/// A `Retry-After` hint wins (capped at 30s); otherwise exponential backoff.
fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// Exponential backoff: 100ms, 200ms, 400ms, ... capped at 10 seconds.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    let delay_ms = delay_ms.min(10_000);
    Duration::from_millis(delay_ms)
}
