//! Message types for conversation history.

use crate::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a conversation transcript.
///
/// Serialized as `{"role": "user", "text": "...", "ts": 1700000000}`, with a
/// `"provider"` key on assistant messages.
///
/// # Examples
///
/// ```
/// use paperclip_core::{Message, Role};
///
/// let message = Message::builder()
///     .role(Role::User)
///     .text("Reverse a linked list")
///     .build()
///     .unwrap();
///
/// assert_eq!(*message.role(), Role::User);
/// assert!(message.provider().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// Message body
    text: String,
    /// When the message was recorded
    #[serde(rename = "ts", with = "chrono::serde::ts_seconds")]
    #[builder(default = "Utc::now()")]
    timestamp: DateTime<Utc>,
    /// Id of the provider that produced an assistant message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    provider: Option<String>,
}

impl Message {
    /// Creates a new message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// A user prompt recorded at `at`.
    pub fn user(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: at,
            provider: None,
        }
    }

    /// A provider response recorded at `at`, tagged with the provider id.
    pub fn assistant(
        text: impl Into<String>,
        provider: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: at,
            provider: Some(provider.into()),
        }
    }
}
