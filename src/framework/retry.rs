//! # Transient Retry
//!
//! Exponential backoff for store reads that failed with a transient error (see
//! [`FrameworkError::is_transient`]). Permanent errors are returned on the first attempt.

use crate::framework::FrameworkError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled after each failure.
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(25),
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Runs `operation` until it succeeds, fails permanently, or the attempts run out.
pub async fn retry_transient<F, Fut, R>(policy: &RetryPolicy, mut operation: F) -> Result<R, FrameworkError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, FrameworkError>>,
{
    let mut attempt = 1;
    let mut delay = policy.initial_delay;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempt, "Read succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) if error.is_transient() && attempt < policy.max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %error,
                    delay_ms = delay.as_millis() as u64,
                    "Transient read failure, retrying"
                );
                sleep(delay).await;
                delay = (delay * 2).min(policy.max_delay);
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
