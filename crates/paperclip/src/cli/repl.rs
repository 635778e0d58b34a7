//! Interactive loop over typed commands and clipboard triggers.

use super::clipboard::{ClipboardHandle, copy_once, spawn_watcher};
use paperclip::{
    App, EXCERPT_CHARS, HELP_TEXT, PaperclipResult, ReplCommand, SubmitOutcome, TriggerAction,
    excerpt,
};
use std::io::Write;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

enum Input {
    Line(String),
    Clip(String),
}

enum Flow {
    Continue,
    Quit,
}

/// Run until `quit`, end of input or `shutdown`. The session is saved on the
/// way out.
pub async fn run_repl(
    mut app: App,
    watch_clipboard: bool,
    shutdown: CancellationToken,
) -> PaperclipResult<()> {
    let (tx, mut rx) = mpsc::channel::<Input>(32);
    spawn_stdin_reader(tx.clone());

    let clipboard = if watch_clipboard {
        let (clip_tx, mut clip_rx) = mpsc::channel::<String>(8);
        let handle = spawn_watcher(
            app.config().trigger.poll_interval(),
            shutdown.clone(),
            clip_tx,
        );
        let forward = tx.clone();
        tokio::spawn(async move {
            while let Some(text) = clip_rx.recv().await {
                if forward.send(Input::Clip(text)).await.is_err() {
                    break;
                }
            }
        });
        Some(handle)
    } else {
        None
    };
    drop(tx);

    println!(
        "Started session {} (id={}). Type 'help' for commands.",
        app.session().name(),
        app.session().id()
    );
    prompt_marker();

    loop {
        let input = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            input = rx.recv() => match input {
                Some(input) => input,
                None => break,
            },
        };

        let flow = match input {
            Input::Line(line) => match ReplCommand::parse(&line) {
                Some(command) => handle_command(&mut app, command, clipboard.as_ref()).await?,
                None => Flow::Continue,
            },
            Input::Clip(text) => {
                handle_text(&mut app, &text, clipboard.as_ref(), false).await;
                Flow::Continue
            }
        };

        if let Flow::Quit = flow {
            println!("Shutting down.");
            break;
        }
        prompt_marker();
    }

    shutdown.cancel();
    app.save().await?;
    info!(session = %app.session().id(), "Session saved");
    Ok(())
}

fn prompt_marker() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

// Plain thread: a pending read must not hold up runtime shutdown.
fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    std::thread::spawn(move || {
        let mut lines = std::io::stdin().lines();
        loop {
            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(_)) | None => "quit".to_string(),
            };
            let quit = line.trim() == "quit";
            if tx.blocking_send(Input::Line(line)).is_err() || quit {
                break;
            }
        }
    });
}

async fn handle_command(
    app: &mut App,
    command: ReplCommand,
    clipboard: Option<&ClipboardHandle>,
) -> PaperclipResult<Flow> {
    match command {
        ReplCommand::Help => println!("{}", HELP_TEXT),
        ReplCommand::Status => {
            for line in app.status_lines() {
                println!("{}", line);
            }
        }
        ReplCommand::NewSession => {
            let session = app.new_session().await?;
            println!("Started session {} (id={})", session.name(), session.id());
        }
        ReplCommand::Providers => {
            let lines = app.provider_lines();
            if lines.is_empty() {
                println!("No providers loaded.");
            }
            for line in lines {
                println!("{}", line);
            }
        }
        ReplCommand::Mode(mode) => {
            app.trigger_mut().set_mode(mode);
            println!("Mode set to {}", mode);
        }
        ReplCommand::Model(kind) => {
            println!("Preferred provider set to {}", kind);
            app.trigger_mut().set_preferred(kind);
        }
        ReplCommand::Invalid(message) => println!("{}", message),
        ReplCommand::Quit => return Ok(Flow::Quit),
        ReplCommand::Text(text) => handle_text(app, &text, clipboard, true).await,
    }
    Ok(Flow::Continue)
}

async fn handle_text(app: &mut App, text: &str, clipboard: Option<&ClipboardHandle>, typed: bool) {
    match app.handle_trigger(text) {
        TriggerAction::Prefer(kind) => println!("[MODE] preferred provider -> {}", kind),
        TriggerAction::SetMode(mode) => println!("[MODE] agent.prompt mode {}", mode),
        TriggerAction::Arm => {
            println!("[TRIGGER] 'agent.prompt' token seen - waiting for the next text.")
        }
        TriggerAction::Submit(prompt) => submit(app, &prompt, clipboard).await,
        TriggerAction::Ignore => {
            if typed {
                println!("Unknown command. Type 'help' or 'h'");
            }
        }
    }
}

async fn submit(app: &mut App, prompt: &str, clipboard: Option<&ClipboardHandle>) {
    println!("Sending prompt to providers...");
    match app.submit(prompt).await {
        Ok(SubmitOutcome::Completed(submission)) => {
            println!("{}", submission.text());
            match clipboard {
                Some(handle) => handle.copy(submission.text()),
                None => copy_once(submission.text().clone()).await,
            }
            println!("> Done (provider={})", submission.provider_id());
        }
        Ok(SubmitOutcome::Skipped) => println!("[SKIP] Request too soon after previous one."),
        Err(e) => {
            error!(error = %e, "Prompt handling failed");
            println!(
                "[ERROR] Prompt handling failed: {}",
                excerpt(&e.to_string(), EXCERPT_CHARS)
            );
        }
    }
}
