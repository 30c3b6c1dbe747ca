//! Bounded retry with randomized exponential backoff
//!
//! The policy retries only transient provider failures (see
//! [`Error::is_transient`]) and stops after a fixed total number of
//! attempts. The delay before attempt `n + 1` is drawn uniformly from
//! `[0, min(max_delay, base_delay * 2^n)]`.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Retry policy for outbound provider calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Backoff multiplier for the first retry
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,

    /// Upper bound on any single backoff delay
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,

    /// Total attempts, including the first
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            max_attempts: 3,
        }
    }
}

impl RetryPolicy {
    /// Run `op` under this policy.
    ///
    /// `op` receives the 1-based attempt number. Transient errors are
    /// retried after a backoff sleep until the attempt budget is spent;
    /// any other error, or the last attempt's error, is returned as-is.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts.max(1) => {
                    let delay = self.backoff_delay(attempt);
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Transient provider failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    if err.is_transient() {
                        warn!(attempt, error = %err, "Retry budget exhausted");
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Compute the jittered delay after a failed attempt (1-based)
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(16);
        let ceiling = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max_delay);
        if ceiling.is_zero() {
            return Duration::ZERO;
        }
        let jittered = rand::thread_rng().gen_range(0.0..=ceiling.as_secs_f64());
        Duration::from_secs_f64(jittered)
    }
}
