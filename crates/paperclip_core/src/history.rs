//! Append-only conversation transcript.

use crate::{Message, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered messages of one session.
///
/// Messages are only ever appended. The dispatcher reads a bounded tail as
/// context and appends one user/assistant pair per successful submission.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use paperclip_core::ConversationHistory;
///
/// let mut history = ConversationHistory::default();
/// history.append_exchange("2 + 2?", "4", "openrouter-main", Utc::now());
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.recent(30).len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a single message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Record a completed submission: the prompt and the response that won.
    pub fn append_exchange(
        &mut self,
        prompt: impl Into<String>,
        response: impl Into<String>,
        provider_id: impl Into<String>,
        at: DateTime<Utc>,
    ) {
        self.messages.push(Message::user(prompt, at));
        self.messages.push(Message::assistant(response, provider_id, at));
    }

    /// The last `window` non-system messages, in original order.
    pub fn recent(&self, window: usize) -> Vec<&Message> {
        let conversational: Vec<&Message> = self
            .messages
            .iter()
            .filter(|m| *m.role() != Role::System)
            .collect();
        let skip = conversational.len().saturating_sub(window);
        conversational.into_iter().skip(skip).collect()
    }
}

impl From<Vec<Message>> for ConversationHistory {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}
