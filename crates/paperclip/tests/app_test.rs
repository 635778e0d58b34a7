use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use paperclip::{
    App, CallResult, Clock, Completion, DispatchSettings, Dispatcher, PaperclipConfig,
    PaperclipErrorKind, PromptContext, Provider, ProviderDriver, ProviderError,
    ProviderErrorKind, ProviderType, Role, SessionStore, SubmitOutcome, TriggerAction,
};
use std::sync::{Arc, Mutex};

/// Answers with a fixed text, or fails every call when `failing`.
struct EchoDriver {
    failing: bool,
    calls: Mutex<Vec<String>>,
}

impl EchoDriver {
    fn new(failing: bool) -> Self {
        Self {
            failing,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ProviderDriver for EchoDriver {
    async fn call(&self, provider: &Provider, context: &PromptContext) -> CallResult {
        self.calls.lock().unwrap().push(provider.id().clone());
        if self.failing {
            return Err(ProviderError::new(ProviderErrorKind::HttpStatus {
                status_code: 500,
                body: "boom".into(),
            }));
        }
        let text = format!("echo: {}", context.prompt());
        Ok(Completion::new(text.clone(), serde_json::json!({ "text": text })))
    }

    fn driver_name(&self) -> &'static str {
        "echo"
    }
}

struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn new() -> Self {
        Self(Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()))
    }

    fn advance(&self, seconds: i64) {
        *self.0.lock().unwrap() += Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

fn providers() -> Vec<Provider> {
    vec![
        Provider::builder()
            .id("openr-main")
            .kind(ProviderType::OpenRouter)
            .priority(1)
            .build()
            .unwrap(),
        Provider::builder()
            .id("gem")
            .kind(ProviderType::Gemini)
            .model("gemini-2.0-flash")
            .priority(2)
            .build()
            .unwrap(),
    ]
}

async fn app_with(
    dir: &std::path::Path,
    driver: Arc<EchoDriver>,
    clock: Arc<ManualClock>,
) -> anyhow::Result<App> {
    let config = PaperclipConfig {
        sessions_dir: dir.to_path_buf(),
        ..PaperclipConfig::default()
    };
    let settings = DispatchSettings::default();
    let dispatcher = Dispatcher::new(driver, settings).with_clock(clock.clone());
    Ok(App::start(config, providers(), dispatcher, clock).await?)
}

#[tokio::test(start_paused = true)]
async fn test_submit_records_and_saves_exchange() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let driver = Arc::new(EchoDriver::new(false));
    let clock = Arc::new(ManualClock::new());
    let mut app = app_with(dir.path(), driver.clone(), clock).await?;

    let outcome = app.submit("hello").await?;
    let SubmitOutcome::Completed(submission) = outcome else {
        panic!("expected a completed submission");
    };
    assert_eq!(submission.provider_id(), "openr-main");
    assert_eq!(submission.text(), "echo: hello");

    let store = SessionStore::new(dir.path())?;
    let saved = store.load(app.session().id()).await?;
    let messages = saved.messages().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(*messages[0].role(), Role::User);
    assert_eq!(messages[1].provider().as_deref(), Some("openr-main"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_preference_reorders_providers() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let driver = Arc::new(EchoDriver::new(false));
    let clock = Arc::new(ManualClock::new());
    let mut app = app_with(dir.path(), driver.clone(), clock).await?;

    assert_eq!(app.handle_trigger("model.gem"), TriggerAction::Prefer("gemini".into()));
    let SubmitOutcome::Completed(submission) = app.submit("hi").await? else {
        panic!("expected a completed submission");
    };
    assert_eq!(submission.provider_id(), "gem");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_spacing_skips_quick_resubmission() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let driver = Arc::new(EchoDriver::new(false));
    let clock = Arc::new(ManualClock::new());
    let mut app = app_with(dir.path(), driver.clone(), clock.clone()).await?;

    app.submit("first").await?;
    clock.advance(1);
    assert_eq!(app.submit("second").await?, SubmitOutcome::Skipped);
    assert_eq!(driver.calls.lock().unwrap().len(), 1);

    clock.advance(1);
    assert!(matches!(app.submit("third").await?, SubmitOutcome::Completed(_)));
    assert_eq!(app.session().messages().len(), 4);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_failure_leaves_session_and_gate_untouched() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let driver = Arc::new(EchoDriver::new(true));
    let clock = Arc::new(ManualClock::new());
    let mut app = app_with(dir.path(), driver.clone(), clock).await?;

    let err = app.submit("hello").await.unwrap_err();
    assert!(matches!(err.kind(), PaperclipErrorKind::Dispatch(_)));
    assert!(err.to_string().contains("All providers failed"));
    assert!(app.session().messages().is_empty());

    // Two attempts per provider
    assert_eq!(driver.calls.lock().unwrap().len(), 4);

    // A failed submission does not start the spacing window
    let err = app.submit("again").await.unwrap_err();
    assert!(err.to_string().contains("All providers failed"));
    Ok(())
}

#[tokio::test]
async fn test_new_session_and_listing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let driver = Arc::new(EchoDriver::new(false));
    let clock = Arc::new(ManualClock::new());
    let mut app = app_with(dir.path(), driver, clock).await?;

    let first = app.session().id().clone();
    let second = app.new_session().await?.id().clone();
    assert_ne!(first, second);
    assert!(dir.path().join(format!("{}.json", first)).exists());
    assert!(dir.path().join(format!("{}.json", second)).exists());

    let status = app.status_lines();
    assert_eq!(status[0], "Mode: off");
    assert_eq!(status[1], "Preferred provider: openrouter");
    assert_eq!(status[3], "Providers: 2");

    let lines = app.provider_lines();
    assert!(lines[0].contains("id=openr-main"));
    assert!(lines[0].contains("endpoint=https://openrouter.ai/v1/chat/completions"));
    assert!(lines[1].contains(
        "endpoint=https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
    ));
    Ok(())
}
