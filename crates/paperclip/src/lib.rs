//! PaperClip - multi-provider LLM prompt dispatch.
//!
//! Prompts arrive from the terminal or the clipboard, are sent to the first
//! provider that answers (Gemini or any OpenAI-compatible chat completions
//! service), and the exchange is appended to a JSON session transcript.
//!
//! # Architecture
//!
//! - `paperclip_error` - Error types
//! - `paperclip_core` - Providers, messages, history, request and result types
//! - `paperclip_interface` - `ProviderDriver` and `Clock` traits
//! - `paperclip_rate_limit` - Retry-after parsing, cooldowns, retry policy
//! - `paperclip_models` - Wire adapters and the HTTP driver
//! - `paperclip_dispatch` - The failover dispatcher and response extraction
//! - `paperclip_storage` - Session persistence
//!
//! This crate re-exports everything and adds settings, provider loading and
//! the trigger surface used by the `paperclip` binary.
//!
//! # Cargo Features
//!
//! - `observability` - Export spans and metrics to stdout via OpenTelemetry

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod command;
mod config;
mod gate;
mod loader;
mod observability;
mod trigger;

pub use app::{App, SubmitOutcome, describe_provider};
pub use command::{HELP_TEXT, ReplCommand};
pub use config::{PaperclipConfig, TriggerSettings};
pub use gate::SubmissionGate;
pub use loader::load_providers;
pub use observability::{
    DEFAULT_LOG_FILTER, ObservabilityConfig, VERBOSE_LOG_FILTER, init_observability,
    shutdown_observability,
};
pub use trigger::{TriggerAction, TriggerMode, TriggerState};

pub use paperclip_core::*;
pub use paperclip_dispatch::*;
pub use paperclip_error::*;
pub use paperclip_interface::*;
pub use paperclip_models::*;
pub use paperclip_rate_limit::*;
pub use paperclip_storage::*;
