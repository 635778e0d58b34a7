//! Successful provider results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized text and the decoded payload of one successful call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Text extracted from the provider response
    pub text: String,
    /// Decoded response body
    pub raw: Value,
}

impl Completion {
    /// Pair normalized text with its raw payload.
    pub fn new(text: impl Into<String>, raw: Value) -> Self {
        Self {
            text: text.into(),
            raw,
        }
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Submission {
    /// Provider that served the request
    provider_id: String,
    /// Normalized response text
    text: String,
    /// Decoded response body
    raw: Value,
}

impl Submission {
    /// Record which provider produced `completion`.
    pub fn new(provider_id: impl Into<String>, completion: Completion) -> Self {
        Self {
            provider_id: provider_id.into(),
            text: completion.text,
            raw: completion.raw,
        }
    }
}
