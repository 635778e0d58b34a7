//! Per-provider cooldowns after rate-limit signals.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Tracks until when each provider is suppressed.
///
/// Availability is computed against the caller's `now` on every query; there
/// is no expiry task and no explicit reset. A new cooldown overwrites the
/// previous one for the same provider.
///
/// Clones share state.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use paperclip_rate_limit::CooldownTracker;
///
/// # #[tokio::main]
/// # async fn main() {
/// let tracker = CooldownTracker::new();
/// let now = Utc::now();
///
/// tracker.disable("gemini-free", now, 30).await;
/// assert!(!tracker.is_available("gemini-free", now).await);
/// assert!(tracker.is_available("gemini-free", now + Duration::seconds(30)).await);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CooldownTracker {
    disabled_until: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl CooldownTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// True unless a cooldown is set and `now` is before its end.
    pub async fn is_available(&self, provider_id: &str, now: DateTime<Utc>) -> bool {
        match self.disabled_until.read().await.get(provider_id) {
            Some(until) => now >= *until,
            None => true,
        }
    }

    /// Suppress `provider_id` for `seconds` from `now`. Last writer wins.
    #[instrument(skip(self))]
    pub async fn disable(&self, provider_id: &str, now: DateTime<Utc>, seconds: u64) {
        let secs = i64::try_from(seconds).unwrap_or(i64::MAX);
        let until = now
            .checked_add_signed(Duration::try_seconds(secs).unwrap_or(Duration::MAX))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        debug!(%until, "Provider cooling down");
        self.disabled_until
            .write()
            .await
            .insert(provider_id.to_string(), until);
    }

    /// Time left on the cooldown, or `None` when the provider is available.
    pub async fn remaining(&self, provider_id: &str, now: DateTime<Utc>) -> Option<Duration> {
        let guard = self.disabled_until.read().await;
        let until = guard.get(provider_id)?;
        (now < *until).then(|| *until - now)
    }

    /// End of the cooldown, if one was ever recorded.
    pub async fn disabled_until(&self, provider_id: &str) -> Option<DateTime<Utc>> {
        self.disabled_until.read().await.get(provider_id).copied()
    }
}
