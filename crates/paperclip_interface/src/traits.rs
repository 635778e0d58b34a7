//! Trait definitions for provider backends and time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use paperclip_core::{Completion, PromptContext, Provider};
use paperclip_error::ProviderError;

/// Outcome of one provider round trip.
pub type CallResult = Result<Completion, ProviderError>;

/// A backend capable of answering one prompt for a given provider record.
///
/// Implementations perform exactly one network round trip per call. Retry,
/// failover and cooldown belong to the dispatcher.
#[async_trait]
pub trait ProviderDriver: Send + Sync {
    /// Send `context` to `provider` and normalize the answer.
    async fn call(&self, provider: &Provider, context: &PromptContext) -> CallResult;

    /// Driver name for logs (e.g., "http").
    fn driver_name(&self) -> &'static str;
}

/// Source of the current time for cooldown bookkeeping.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
