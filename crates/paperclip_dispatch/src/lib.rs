//! Multi-provider prompt dispatch.
//!
//! The [`Dispatcher`] takes a prompt, a conversation history and an ordered
//! provider list, and returns the first successful answer, applying retry,
//! rate-limit cooldowns and failover along the way. [`extract_payload`]
//! post-processes answers for consumers that only want the code.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod dispatcher;
mod extraction;
mod settings;

pub use context::{build_context, order_providers};
pub use dispatcher::Dispatcher;
pub use extraction::{
    FENCED_MARKER, HEURISTIC_MARKER, MINIMAL_MARKER, MINIMAL_MAX_CHARS, extract_payload,
};
pub use settings::{DEFAULT_SYSTEM_PROMPT, DispatchSettings, PreferenceMatch};
