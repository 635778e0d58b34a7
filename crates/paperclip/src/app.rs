//! Session-scoped application state behind the CLI.

use crate::{PaperclipConfig, SubmissionGate, TriggerAction, TriggerState, load_providers};
use paperclip_core::{Provider, Submission};
use paperclip_dispatch::Dispatcher;
use paperclip_error::PaperclipResult;
use paperclip_interface::{Clock, SystemClock};
use paperclip_models::{HttpProviderDriver, ProviderAdapter};
use paperclip_storage::{Session, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Result of [`App::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A provider answered
    Completed(Submission),
    /// Too soon after the previous response; nothing was sent
    Skipped,
}

/// Providers, the current session and trigger state, wired to a dispatcher.
pub struct App {
    config: PaperclipConfig,
    providers: Vec<Provider>,
    dispatcher: Dispatcher,
    store: SessionStore,
    session: Session,
    trigger: TriggerState,
    gate: SubmissionGate,
    clock: Arc<dyn Clock>,
}

impl App {
    /// Load providers, build the HTTP driver and start a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider file is malformed, the HTTP client
    /// cannot be built or the sessions directory is unusable.
    #[instrument(skip_all)]
    pub async fn bootstrap(
        config: PaperclipConfig,
        shutdown: CancellationToken,
    ) -> PaperclipResult<Self> {
        let providers = load_providers(&config.providers_file).await?;
        let timeout = Duration::from_secs(*config.dispatch.request_timeout_secs());
        let driver = HttpProviderDriver::new(timeout)?;
        let dispatcher =
            Dispatcher::new(Arc::new(driver), config.dispatch.clone()).with_shutdown(shutdown);
        Self::start(config, providers, dispatcher, Arc::new(SystemClock)).await
    }

    /// Start a session over an already built dispatcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions directory cannot be created or the
    /// new session cannot be written.
    pub async fn start(
        config: PaperclipConfig,
        providers: Vec<Provider>,
        dispatcher: Dispatcher,
        clock: Arc<dyn Clock>,
    ) -> PaperclipResult<Self> {
        let store = SessionStore::new(&config.sessions_dir)?;
        let session = store.start(&config.session_name, clock.now()).await?;
        let trigger = TriggerState::new(config.preferred().map(str::to_string));
        let gate = SubmissionGate::new(config.trigger.min_spacing());
        Ok(Self {
            config,
            providers,
            dispatcher,
            store,
            session,
            trigger,
            gate,
            clock,
        })
    }

    /// Active settings.
    pub fn config(&self) -> &PaperclipConfig {
        &self.config
    }

    /// Loaded providers, including disabled ones.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Trigger mode and preference.
    pub fn trigger(&self) -> &TriggerState {
        &self.trigger
    }

    /// Mutable trigger state.
    pub fn trigger_mut(&mut self) -> &mut TriggerState {
        &mut self.trigger
    }

    /// Feed trigger text through the trigger state.
    pub fn handle_trigger(&mut self, text: &str) -> TriggerAction {
        self.trigger.handle(text)
    }

    /// Send `prompt` to the providers and record the exchange.
    ///
    /// The session is saved after every completed submission.
    ///
    /// # Errors
    ///
    /// Returns the dispatch failure when no provider answers, or a storage
    /// error if the session cannot be saved.
    #[instrument(skip(self, prompt), fields(session = %self.session.id()))]
    pub async fn submit(&mut self, prompt: &str) -> PaperclipResult<SubmitOutcome> {
        if !self.gate.allows(self.clock.now()) {
            info!("Skipping submission, too soon after previous response");
            return Ok(SubmitOutcome::Skipped);
        }

        let submission = self
            .dispatcher
            .submit(
                prompt,
                self.session.history_mut(),
                &self.providers,
                self.trigger.preferred(),
            )
            .await?;

        self.gate.record_response(self.clock.now());
        self.store.save(&self.session).await?;
        info!(provider = %submission.provider_id(), "Submission completed");
        Ok(SubmitOutcome::Completed(submission))
    }

    /// Save the current session and start a fresh one.
    ///
    /// # Errors
    ///
    /// Returns a storage error if either session cannot be written.
    pub async fn new_session(&mut self) -> PaperclipResult<&Session> {
        self.store.save(&self.session).await?;
        self.session = self
            .store
            .start(&self.config.session_name, self.clock.now())
            .await?;
        Ok(&self.session)
    }

    /// Write the current session to disk.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session cannot be written.
    pub async fn save(&self) -> PaperclipResult<()> {
        self.store.save(&self.session).await
    }

    /// Human-readable status summary.
    pub fn status_lines(&self) -> Vec<String> {
        vec![
            format!("Mode: {}", self.trigger.mode()),
            format!(
                "Preferred provider: {}",
                self.trigger.preferred().unwrap_or("none")
            ),
            format!("Session: {}", self.session.name()),
            format!(
                "Providers: {}",
                self.providers.iter().filter(|p| *p.enabled()).count()
            ),
        ]
    }

    /// One line per loaded provider, with its resolved endpoint.
    pub fn provider_lines(&self) -> Vec<String> {
        self.providers.iter().map(describe_provider).collect()
    }
}

/// Listing line for one provider.
pub fn describe_provider(provider: &Provider) -> String {
    let endpoint = match ProviderAdapter::for_provider(provider).endpoint(provider) {
        Ok(url) => url,
        Err(e) => format!("<{}>", e.summary()),
    };
    format!(
        "- id={} name={} type={} model={} priority={} enabled={} endpoint={}",
        provider.id(),
        provider.display_name(),
        provider.kind(),
        provider.model_name().unwrap_or("-"),
        provider.priority(),
        provider.enabled(),
        endpoint
    )
}
