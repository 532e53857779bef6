//! Retry with exponential backoff for Google API calls.

use crate::error::{DashboardError, Result};
use reqwest::header::{HeaderValue, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self { max_attempts, ..Self::default() }
    }
}

pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

/// Backoff before the next attempt. `Retry-After` seconds win, capped at 30.
pub fn retry_delay(attempt: u32, policy: &RetryPolicy, retry_after: Option<&HeaderValue>) -> Duration {
    if let Some(secs) = retry_after
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
    {
        return Duration::from_secs(secs.min(30));
    }

    let exponent = 2u64.saturating_pow(attempt.saturating_sub(1));
    let base = policy
        .initial_backoff_ms
        .saturating_mul(exponent)
        .min(policy.max_backoff_ms);
    let jitter = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0)
        % 150;
    Duration::from_millis(base.saturating_add(jitter))
}

pub async fn send_with_retry(
    request: reqwest::RequestBuilder,
    policy: &RetryPolicy,
) -> Result<reqwest::Response> {
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        // Streaming bodies cannot be cloned; send them once
        let Some(cloned) = request.try_clone() else {
            return Ok(request.send().await?);
        };

        match cloned.send().await {
            Ok(response) => {
                let status = response.status();
                if is_retryable_status(status) && attempt < attempts {
                    let delay = retry_delay(attempt, policy, response.headers().get(RETRY_AFTER));
                    warn!(
                        "google api retry {}/{} after status {} (sleep {:?})",
                        attempt, attempts, status, delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Ok(response);
            }
            Err(err) => {
                if (err.is_timeout() || err.is_connect()) && attempt < attempts {
                    let delay = retry_delay(attempt, policy, None);
                    warn!(
                        "google api retry {}/{} after transport error: {} (sleep {:?})",
                        attempt, attempts, err, delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Err(DashboardError::Http(err));
            }
        }
    }

    Err(DashboardError::Api {
        status: 0,
        message: "request exhausted retries".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable_status(StatusCode::FORBIDDEN));
        assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_retry_delay_grows_and_caps() {
        let policy = RetryPolicy::default();
        let first = retry_delay(1, &policy, None);
        let third = retry_delay(3, &policy, None);
        let tenth = retry_delay(10, &policy, None);
        assert!(first >= Duration::from_millis(250) && first < Duration::from_millis(400));
        assert!(third >= Duration::from_millis(1000));
        assert!(tenth < Duration::from_millis(2_150));
    }

    #[test]
    fn test_retry_after_header_wins() {
        let policy = RetryPolicy::default();
        let header = HeaderValue::from_static("120");
        assert_eq!(retry_delay(1, &policy, Some(&header)), Duration::from_secs(30));
        let header = HeaderValue::from_static("2");
        assert_eq!(retry_delay(1, &policy, Some(&header)), Duration::from_secs(2));
    }
}
