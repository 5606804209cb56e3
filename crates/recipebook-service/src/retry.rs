//! Caller-side retry for optimistic-concurrency conflicts.
//!
//! The services never retry on their own. A caller that prefers "retry until
//! my change lands" over "report the conflict" wraps the whole operation:
//!
//! ```ignore
//! let policy = RetryPolicy::default();
//! let saved = retry_on_conflict(&policy, || {
//!     ingredients.save_ingredient(&recipe_id, payload.clone())
//! })
//! .await?;
//! ```
//!
//! Each attempt re-runs the full load-mutate-persist cycle, so it works on a
//! fresh copy of the recipe.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Linear backoff step; attempt `n` waits `n * backoff_ms` before retrying
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    10
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl RetryPolicy {
    pub fn no_backoff(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff_ms: 0,
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Runs `op` until it succeeds, fails with something other than a conflict,
/// or exhausts `policy.max_attempts`. The last error is returned unchanged.
pub async fn retry_on_conflict<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if err.is_conflict() && attempt < max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    operation = err.operation(),
                    "Conflict, retrying"
                );
                let delay = policy.delay(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
            outcome => return outcome,
        }
    }
}
