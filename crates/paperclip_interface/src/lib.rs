//! Trait definitions for the PaperClip prompt dispatcher.
//!
//! [`ProviderDriver`] is the seam between the dispatcher and concrete
//! backends; [`Clock`] lets cooldown logic run against a controlled time
//! source in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{CallResult, Clock, ProviderDriver, SystemClock};
pub use types::FailureCategory;
