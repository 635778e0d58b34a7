//! One-shot submission.

use paperclip::{App, PaperclipConfig, PaperclipResult, SubmitOutcome, extract_payload};
use tokio_util::sync::CancellationToken;

/// Submit `prompt` once, print the answer and save the session.
pub async fn run_ask(
    config: PaperclipConfig,
    shutdown: CancellationToken,
    prompt: &str,
    prefer: Option<String>,
    extract: bool,
) -> PaperclipResult<()> {
    let mut app = App::bootstrap(config, shutdown).await?;
    if let Some(prefer) = prefer {
        app.trigger_mut().set_preferred(prefer);
    }

    let result = app.submit(prompt).await;
    app.save().await?;

    if let SubmitOutcome::Completed(submission) = result? {
        if extract {
            print!("{}", extract_payload(submission.text()));
        } else {
            println!("{}", submission.text());
        }
        tracing::info!(provider = %submission.provider_id(), session = %app.session().name(), "Done");
    }
    Ok(())
}
