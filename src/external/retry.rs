// ABOUTME: Bounded exponential-backoff retry with random jitter for external requests
// ABOUTME: Retries only errors whose code is transient (timeouts, connect failures, 429, 5xx)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::RetryConfig;
use crate::errors::AppResult;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// HTTP statuses worth repeating a request for
#[must_use]
pub const fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Uniform random duration in `0..=max`
#[must_use]
pub fn jitter(max: Duration) -> Duration {
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
}

/// Full sleep before retry number `retry` (1-based): backoff plus jitter
#[must_use]
pub fn delay_for_retry(config: &RetryConfig, retry: u32) -> Duration {
    config.backoff_for_retry(retry) + jitter(config.max_jitter)
}

/// Run `operation` until it succeeds, fails permanently, or attempts run out
///
/// # Errors
///
/// Returns the last error once it is not retryable or `max_attempts` is reached
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempt < max_attempts => {
                let delay = delay_for_retry(config, attempt);
                warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %error,
                    "Transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
