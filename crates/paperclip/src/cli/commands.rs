//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PaperClip - send prompts to the first LLM provider that answers
#[derive(Parser, Debug)]
#[command(name = "paperclip")]
#[command(about = "Send prompts to the first LLM provider that answers, with clipboard triggers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file used instead of the home and working-directory overrides
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a single prompt and print the answer
    Ask {
        /// Prompt text
        prompt: String,

        /// Provider type to try first (e.g. gemini, openrouter)
        #[arg(long)]
        prefer: Option<String>,

        /// Print only the extracted code payload
        #[arg(long)]
        extract: bool,
    },

    /// Interactive command loop
    Repl {
        /// Also watch the clipboard for trigger text
        #[arg(long)]
        watch_clipboard: bool,
    },

    /// List providers and their resolved endpoints
    Providers,
}
