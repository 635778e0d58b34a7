//! Rate-limit handling for provider dispatch.
//!
//! - [`parse_retry_delay`] reads retry-after hints out of 429 payloads,
//!   degrading to a fixed default rather than failing.
//! - [`CooldownTracker`] remembers which providers asked us to back off and
//!   until when.
//! - [`RetryPolicy`] bounds transient retries against one provider.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cooldown;
mod policy;
mod retry_delay;

pub use cooldown::CooldownTracker;
pub use policy::RetryPolicy;
pub use retry_delay::{DEFAULT_RETRY_DELAY_SECS, parse_delay_str, parse_retry_delay};
