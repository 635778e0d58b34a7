//! Outgoing request context assembled once per submission.

use crate::Role;
use serde::{Deserialize, Serialize};

/// One wire-level chat turn: role and text only.
///
/// Serializes to the chat-completions message shape.
///
/// # Examples
///
/// ```
/// use paperclip_core::{ChatTurn, Role};
///
/// let turn = ChatTurn::new(Role::User, "hello");
/// let json = serde_json::to_value(&turn).unwrap();
/// assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Author of the turn
    pub role: Role,
    /// Turn text
    pub content: String,
}

impl ChatTurn {
    /// Create a turn.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Everything an adapter needs to phrase one request.
///
/// `turns` is system instruction, trimmed history, then the new user turn.
/// `prompt` is the raw prompt text for adapters that only send the latest
/// prompt.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct PromptContext {
    turns: Vec<ChatTurn>,
    prompt: String,
}

impl PromptContext {
    /// Bundle turns with the raw prompt.
    pub fn new(turns: Vec<ChatTurn>, prompt: impl Into<String>) -> Self {
        Self {
            turns,
            prompt: prompt.into(),
        }
    }
}
