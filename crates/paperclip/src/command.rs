//! Interactive commands typed at the prompt.

use crate::TriggerMode;

/// Help shown for `h` / `help`.
pub const HELP_TEXT: &str = "Commands:
  h/help         show this help
  status         show session and mode
  new            start new session
  providers      list loaded providers
  mode all       enable agent.promptall
  mode off       disable agent.promptall
  model gem      prefer Gemini providers
  model openr    prefer OpenRouter providers
  quit / exit    stop
Anything else is handled like copied text (e.g. agent.prompt: <question>).";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Show help
    Help,
    /// Show mode, preference, session and provider count
    Status,
    /// Start a new session
    NewSession,
    /// List providers
    Providers,
    /// Switch trigger mode
    Mode(TriggerMode),
    /// Change preferred provider type
    Model(String),
    /// Stop
    Quit,
    /// Recognized command with a bad argument
    Invalid(&'static str),
    /// Not a command; treat as trigger text
    Text(String),
}

impl ReplCommand {
    /// Parse one line. Blank lines yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use paperclip::{ReplCommand, TriggerMode};
    ///
    /// assert_eq!(ReplCommand::parse("mode one"), Some(ReplCommand::Mode(TriggerMode::Off)));
    /// assert_eq!(ReplCommand::parse("model gem"), Some(ReplCommand::Model("gemini".into())));
    /// assert_eq!(ReplCommand::parse("   "), None);
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = line.trim();
        if cmd.is_empty() {
            return None;
        }

        let command = match cmd {
            "h" | "help" => ReplCommand::Help,
            "status" => ReplCommand::Status,
            "new" => ReplCommand::NewSession,
            "providers" => ReplCommand::Providers,
            "quit" | "exit" => ReplCommand::Quit,
            _ => {
                if let Some(value) = cmd.strip_prefix("mode ") {
                    match value.trim() {
                        "all" => ReplCommand::Mode(TriggerMode::All),
                        "off" | "one" => ReplCommand::Mode(TriggerMode::Off),
                        _ => ReplCommand::Invalid("mode must be: all or off"),
                    }
                } else if let Some(value) = cmd.strip_prefix("model ") {
                    match value.trim() {
                        "gem" => ReplCommand::Model("gemini".to_string()),
                        "openr" => ReplCommand::Model("openrouter".to_string()),
                        _ => ReplCommand::Invalid("model must be: gem or openr"),
                    }
                } else {
                    ReplCommand::Text(cmd.to_string())
                }
            }
        };
        Some(command)
    }
}
