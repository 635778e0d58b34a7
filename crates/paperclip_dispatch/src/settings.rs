//! Dispatcher tuning.

use paperclip_rate_limit::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Instruction sent ahead of every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful coding assistant. Provide complete, detailed responses without truncating or summarizing. When asked for code, return the full code with explanations if needed. Do not limit response length. The questions which will be asked are mostly hard coding, debugging, programming and object oriented programming questions. Your solutions must satisfy all test cases, handle edge cases, and use efficient algorithms and clean, readable style.";

/// How a preferred-type token selects providers.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PreferenceMatch {
    /// Declared type equals the token, or the id contains it
    #[default]
    TypeOrId,
    /// Declared type equals the token
    TypeOnly,
}

impl PreferenceMatch {
    /// Whether id substrings count as a match.
    pub fn matches_id(&self) -> bool {
        matches!(self, PreferenceMatch::TypeOrId)
    }
}

fn default_history_window() -> usize {
    30
}

fn default_request_timeout_secs() -> u64 {
    90
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

/// Settings for one [`Dispatcher`](crate::Dispatcher).
///
/// # Examples
///
/// ```
/// use paperclip_dispatch::DispatchSettings;
///
/// let settings = DispatchSettings::default().with_history_window(10);
/// assert_eq!(*settings.history_window(), 10);
/// assert_eq!(*settings.retry().max_attempts(), 2);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct DispatchSettings {
    /// Per-provider attempt budget and backoff
    #[serde(flatten)]
    retry: RetryPolicy,
    /// Most recent history messages included as context
    #[serde(default = "default_history_window")]
    history_window: usize,
    /// Bound on one provider round trip
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
    /// Matching rule for the preferred provider type
    #[serde(default)]
    preference_match: PreferenceMatch,
    /// Instruction prepended to every context
    #[serde(default = "default_system_prompt")]
    system_prompt: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            history_window: default_history_window(),
            request_timeout_secs: default_request_timeout_secs(),
            preference_match: PreferenceMatch::default(),
            system_prompt: default_system_prompt(),
        }
    }
}
