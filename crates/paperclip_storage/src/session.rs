//! Conversation sessions.

use chrono::{DateTime, Utc};
use paperclip_core::ConversationHistory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One conversation and its transcript.
///
/// Persisted as:
///
/// ```json
/// {
///   "id": "3f9c2a1b",
///   "name": "local_session_3f9c2a1b",
///   "created_at": 1700000000,
///   "messages": [{"role": "user", "text": "...", "ts": 1700000000}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Session {
    /// Eight hex characters, also the file stem
    id: String,
    /// `{prefix}_{id}`
    name: String,
    /// Creation time
    #[serde(with = "chrono::serde::ts_seconds")]
    created_at: DateTime<Utc>,
    /// Transcript
    #[serde(default)]
    messages: ConversationHistory,
}

impl Session {
    /// Fresh, empty session named after `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use paperclip_storage::Session;
    ///
    /// let session = Session::new("local_session", Utc::now());
    /// assert_eq!(session.id().len(), 8);
    /// assert_eq!(session.name(), &format!("local_session_{}", session.id()));
    /// assert!(session.messages().is_empty());
    /// ```
    pub fn new(prefix: &str, created_at: DateTime<Utc>) -> Self {
        let id = Uuid::new_v4().simple().to_string()[..8].to_string();
        Self {
            name: format!("{}_{}", prefix, id),
            id,
            created_at,
            messages: ConversationHistory::new(),
        }
    }

    /// Mutable access to the transcript, for the dispatcher to append to.
    pub fn history_mut(&mut self) -> &mut ConversationHistory {
        &mut self.messages
    }
}
