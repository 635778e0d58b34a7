//! PaperClip CLI binary.
//!
//! - `ask` sends one prompt and prints the answer
//! - `repl` runs the interactive loop, optionally watching the clipboard
//! - `providers` lists the configured providers

use clap::Parser;
use paperclip::{
    ObservabilityConfig, PaperclipConfig, VERBOSE_LOG_FILTER, describe_provider,
    init_observability, load_providers, shutdown_observability,
};
use tokio_util::sync::CancellationToken;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_ask, run_repl};

    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new("paperclip").with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level(VERBOSE_LOG_FILTER);
    }
    init_observability(observability)?;

    let config = match &cli.config {
        Some(path) => PaperclipConfig::from_file(path)?,
        None => PaperclipConfig::load()?,
    };

    let shutdown = CancellationToken::new();
    let on_ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, shutting down");
            on_ctrl_c.cancel();
        }
    });

    match cli.command {
        Commands::Ask {
            prompt,
            prefer,
            extract,
        } => {
            run_ask(config, shutdown, &prompt, prefer, extract).await?;
        }

        Commands::Repl { watch_clipboard } => {
            let app = paperclip::App::bootstrap(config, shutdown.clone()).await?;
            run_repl(app, watch_clipboard, shutdown).await?;
        }

        Commands::Providers => {
            let providers = load_providers(&config.providers_file).await?;
            if providers.is_empty() {
                println!("No providers loaded from {}", config.providers_file.display());
            }
            for provider in &providers {
                println!("{}", describe_provider(provider));
            }
        }
    }

    shutdown_observability();
    Ok(())
}
