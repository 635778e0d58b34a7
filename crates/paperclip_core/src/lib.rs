//! Core data types for the PaperClip prompt dispatcher.
//!
//! This crate provides the data model shared by every other crate: providers
//! as loaded from configuration, conversation transcripts, and the request
//! and result shapes that flow through the dispatcher.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod context;
mod history;
mod message;
mod provider;
mod role;

pub use completion::{Completion, Submission};
pub use context::{ChatTurn, PromptContext};
pub use history::ConversationHistory;
pub use message::{Message, MessageBuilder, MessageBuilderError};
pub use provider::{
    DEFAULT_PRIORITY, Provider, ProviderBuilder, ProviderBuilderError, ProviderRecord,
    ProviderType, normalize_providers,
};
pub use role::Role;
