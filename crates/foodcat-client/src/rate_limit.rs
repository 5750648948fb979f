//! Backoff and retry for transient upstream failures.
//!
//! Retries are off unless configured: with `max_retries = 0` every request
//! runs exactly once, and a 429 or 5xx surfaces to the caller as-is.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Upper bound on a single backoff sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Rate limiting, network failures, and 5xx responses are transient. A 404,
/// an undecodable body, or a bad record fails the same way on every attempt.
fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::RateLimited { .. } | ClientError::Http(_) => true,
        ClientError::UnexpectedStatus { status, .. } => *status >= 500,
        ClientError::Deserialize { .. }
        | ClientError::NotFound { .. }
        | ClientError::Normalization { .. }
        | ClientError::PaginationLimit { .. }
        | ClientError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// Retry `n` sleeps `backoff_base_ms * 2^(n-1)` first, jittered by ±25 % and
/// capped at 60 s. The last error is returned once retries run out.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut retries = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || retries >= max_retries => return Err(err),
            Err(err) => err,
        };

        retries += 1;
        let delay_ms = backoff_delay_ms(backoff_base_ms, retries);
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms,
            error = %err,
            "transient Open Food Facts error, backing off"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

/// Delay before retry number `retry` (1-based).
fn backoff_delay_ms(backoff_base_ms: u64, retry: u32) -> u64 {
    let exponent = retry.saturating_sub(1).min(16);
    let capped = backoff_base_ms
        .saturating_mul(1u64 << exponent)
        .min(MAX_DELAY_MS);
    let factor = rand::random_range(0.75..=1.25);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * factor) as u64;
    jittered
}
