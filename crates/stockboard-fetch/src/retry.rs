//! Bounded retry for malformed catalog responses.
//!
//! The catalog API is deliberately flaky: it answers 200 with an empty or
//! half-formed body every so often, and asking again usually works. Only
//! [`FetchError::MalformedPayload`] is retried. Transport failures and non-200
//! statuses are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Upper bound on a single backoff sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// How many times to re-issue a request whose body was malformed, and how
/// long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one. `0` disables retries.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_ms * 2^(attempt - 1)`.
    /// `0` re-issues the request immediately.
    pub backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            backoff_base_ms: 250,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), before jitter.
    ///
    /// | Attempt | Delay with `backoff_base_ms = 250` |
    /// |---------|------------------------------------|
    /// | 1       | 250 ms                             |
    /// | 2       | 500 ms                             |
    /// | 3       | 1 000 ms                           |
    ///
    /// Capped at 30 s.
    #[must_use]
    pub fn base_delay_ms(&self, attempt: u32) -> u64 {
        let exponent = attempt.saturating_sub(1).min(20);
        self.backoff_base_ms
            .saturating_mul(1u64 << exponent)
            .min(MAX_DELAY_MS)
    }
}

/// Returns `true` for errors that asking again can fix.
pub(crate) fn is_retriable(err: &FetchError) -> bool {
    matches!(err, FetchError::MalformedPayload { .. })
}

/// Runs `operation` with up to `policy.max_retries` additional attempts on
/// malformed payloads, sleeping `base_delay_ms ± 25 %` between attempts.
///
/// Non-retriable errors are returned immediately. When retries are exhausted
/// the last error is returned.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    url: &str,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let base = policy.base_delay_ms(attempt);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (base as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    url,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms,
                    error = %err,
                    "malformed payload, retrying"
                );
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}
