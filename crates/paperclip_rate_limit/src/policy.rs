//! Intra-provider retry budget.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_max_attempts() -> u32 {
    2
}

fn default_backoff_base_ms() -> u64 {
    400
}

/// How many times one provider is tried, and how long to wait in between.
///
/// The wait before attempt `n + 1` is `n × backoff_base_ms`. Rate-limit
/// signals bypass the budget entirely.
///
/// # Examples
///
/// ```
/// use paperclip_rate_limit::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.max_attempts(), 2);
/// assert_eq!(policy.backoff(1), Duration::from_millis(400));
/// let delays: Vec<Duration> = policy.delays().collect();
/// assert_eq!(delays, vec![Duration::from_millis(400)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RetryPolicy {
    /// Attempts per provider per submission.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
    /// Linear backoff step in milliseconds.
    #[serde(default = "default_backoff_base_ms")]
    backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

impl RetryPolicy {
    /// Policy with explicit limits. A zero attempt budget is raised to one.
    pub fn new(max_attempts: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base_ms,
        }
    }

    /// Wait after failed attempt number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms.saturating_mul(u64::from(attempt)))
    }

    /// Waits between consecutive attempts, one fewer than the budget.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let policy = *self;
        (1..policy.max_attempts.max(1)).map(move |attempt| policy.backoff(attempt))
    }
}
