//! Command-line interface module.

mod ask;
mod clipboard;
mod commands;
mod repl;

pub use ask::run_ask;
pub use commands::{Cli, Commands};
pub use repl::run_repl;
