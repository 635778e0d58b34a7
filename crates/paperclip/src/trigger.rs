//! Trigger vocabulary shared by the clipboard watcher and typed input.
//!
//! | Text (case-insensitive prefix) | Effect |
//! |--------------------------------|--------|
//! | `model.gem`                    | prefer gemini providers |
//! | `model.openr`                  | prefer openrouter providers |
//! | `agent.promptall`              | every new text becomes a prompt |
//! | `agent.promptone`, `agent.prompt off` | back to explicit prompts |
//! | `agent.prompt: <text>`         | submit `<text>` |
//! | `agent.prompt`                 | submit the next text |

use regex::Regex;
use std::sync::LazyLock;

static PROMPT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^agent\.prompt[:\s]*").expect("Valid prompt prefix regex")
});

/// Whether every new text is treated as a prompt.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum TriggerMode {
    /// Only `agent.prompt` texts are submitted
    #[default]
    Off,
    /// Every new text is submitted
    All,
}

/// What a piece of trigger text asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    /// Try providers of this type first
    Prefer(String),
    /// Switch prompt mode
    SetMode(TriggerMode),
    /// Submit this prompt
    Submit(String),
    /// Submit whatever text arrives next
    Arm,
    /// Nothing to do
    Ignore,
}

impl TriggerAction {
    /// Classify `text` given the current mode and whether a bare
    /// `agent.prompt` is waiting for its prompt.
    ///
    /// Mode and preference tokens always win, so they cannot be sent as
    /// prompts by accident.
    ///
    /// # Examples
    ///
    /// ```
    /// use paperclip::{TriggerAction, TriggerMode};
    ///
    /// assert_eq!(
    ///     TriggerAction::classify("agent.prompt: fix my loop", TriggerMode::Off, false),
    ///     TriggerAction::Submit("fix my loop".to_string())
    /// );
    /// assert_eq!(
    ///     TriggerAction::classify("unrelated copy", TriggerMode::Off, false),
    ///     TriggerAction::Ignore
    /// );
    /// ```
    pub fn classify(text: &str, mode: TriggerMode, armed: bool) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return TriggerAction::Ignore;
        }
        let lower = trimmed.to_lowercase();

        if lower.starts_with("model.gem") {
            return TriggerAction::Prefer("gemini".to_string());
        }
        if lower.starts_with("model.openr") {
            return TriggerAction::Prefer("openrouter".to_string());
        }
        if lower.starts_with("agent.promptall") {
            return TriggerAction::SetMode(TriggerMode::All);
        }
        if lower.starts_with("agent.promptone") || lower.starts_with("agent.prompt off") {
            return TriggerAction::SetMode(TriggerMode::Off);
        }
        if mode == TriggerMode::All {
            return TriggerAction::Submit(trimmed.to_string());
        }
        if lower.starts_with("agent.prompt") {
            let rest = PROMPT_PREFIX_RE.replace(trimmed, "");
            let rest = rest.trim();
            if rest.is_empty() {
                return TriggerAction::Arm;
            }
            return TriggerAction::Submit(rest.to_string());
        }
        if armed {
            return TriggerAction::Submit(trimmed.to_string());
        }
        TriggerAction::Ignore
    }
}

/// Mutable trigger state: mode, preferred type, and a pending bare
/// `agent.prompt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerState {
    mode: TriggerMode,
    preferred: Option<String>,
    armed: bool,
}

impl TriggerState {
    /// State with mode off and `preferred` as the initial provider type.
    pub fn new(preferred: Option<String>) -> Self {
        Self {
            mode: TriggerMode::Off,
            preferred,
            armed: false,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// Current preferred provider type.
    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    /// True while waiting for the prompt that follows a bare `agent.prompt`.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Switch mode. Clears any pending bare `agent.prompt`.
    pub fn set_mode(&mut self, mode: TriggerMode) {
        self.mode = mode;
        self.armed = false;
    }

    /// Change the preferred provider type.
    pub fn set_preferred(&mut self, preferred: impl Into<String>) {
        self.preferred = Some(preferred.into());
    }

    /// Classify `text`, apply state changes, and return the action taken.
    pub fn handle(&mut self, text: &str) -> TriggerAction {
        let action = TriggerAction::classify(text, self.mode, self.armed);
        match &action {
            TriggerAction::Prefer(kind) => {
                tracing::info!(preferred = %kind, "Preferred provider changed");
                self.set_preferred(kind.clone());
            }
            TriggerAction::SetMode(mode) => {
                tracing::info!(mode = %mode, "Trigger mode changed");
                self.set_mode(*mode);
            }
            TriggerAction::Submit(_) => {
                self.armed = false;
            }
            TriggerAction::Arm => {
                tracing::info!("Prompt token seen, waiting for the next text");
                self.armed = true;
            }
            TriggerAction::Ignore => {}
        }
        action
    }
}
