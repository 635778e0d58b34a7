//! Clipboard polling and write-back.
//!
//! `arboard` is synchronous, so the clipboard lives on a blocking thread
//! that both polls for new text and performs writes. Text written by us is
//! remembered so it is not read back as a new trigger.

use std::sync::mpsc::{self, Sender};
use std::time::Duration;
use tokio::sync::mpsc::Sender as EventSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Handle for writing to the watched clipboard.
#[derive(Debug, Clone)]
pub struct ClipboardHandle {
    writes: Sender<String>,
}

impl ClipboardHandle {
    /// Queue `text` to be placed on the clipboard.
    pub fn copy(&self, text: &str) {
        if self.writes.send(text.to_string()).is_err() {
            warn!("Clipboard watcher stopped, response not copied");
        }
    }
}

/// Start polling the clipboard every `poll`. New, non-empty text is sent on
/// `events` until `shutdown` is cancelled or the receiver is dropped.
pub fn spawn_watcher(
    poll: Duration,
    shutdown: CancellationToken,
    events: EventSender<String>,
) -> ClipboardHandle {
    let (writes, pending) = mpsc::channel::<String>();

    tokio::task::spawn_blocking(move || {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                warn!(error = %e, "Clipboard unavailable, watcher not started");
                return;
            }
        };
        info!("Clipboard watcher started. Copy text starting with 'agent.prompt' to trigger.");

        let mut last = String::new();
        while !shutdown.is_cancelled() {
            while let Ok(text) = pending.try_recv() {
                match clipboard.set_text(text.clone()) {
                    Ok(()) => last = text,
                    Err(e) => warn!(error = %e, "Failed to copy response to clipboard"),
                }
            }

            // Non-text contents read as an error; treat as nothing new
            if let Ok(text) = clipboard.get_text() {
                if !text.is_empty() && text != last {
                    debug!(chars = text.len(), "New clipboard text");
                    last = text.clone();
                    if events.blocking_send(text).is_err() {
                        break;
                    }
                }
            }

            std::thread::sleep(poll);
        }
        debug!("Clipboard watcher stopped");
    });

    ClipboardHandle { writes }
}

/// Copy `text` once, without a watcher running.
pub async fn copy_once(text: String) {
    let result = tokio::task::spawn_blocking(move || {
        arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text))
    })
    .await;

    match result {
        Ok(Ok(())) => debug!("Response copied to clipboard"),
        Ok(Err(e)) => warn!(error = %e, "Failed to copy response to clipboard"),
        Err(e) => warn!(error = %e, "Clipboard task failed"),
    }
}
