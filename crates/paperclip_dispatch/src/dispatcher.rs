//! Failover across providers for one logical prompt.

use crate::{DispatchSettings, build_context, order_providers};
use paperclip_core::{Completion, ConversationHistory, PromptContext, Provider, Submission};
use paperclip_error::{DispatchError, DispatchErrorKind, ProviderError, RetryableError};
use paperclip_interface::{Clock, ProviderDriver, SystemClock};
use paperclip_rate_limit::CooldownTracker;
use std::sync::Arc;
use tokio_retry2::{Retry, RetryError};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Orchestrates provider ordering, retries, cooldowns and failover.
///
/// Attempts are strictly sequential: the first success ends the submission
/// and no provider is called twice concurrently for the same prompt.
///
/// Per provider:
/// - a cooling-down provider is skipped
/// - a rate-limit signal starts a cooldown and moves on immediately
/// - a configuration failure moves on immediately
/// - transient failures are retried up to the attempt budget with linear
///   backoff
///
/// History is written only on success: one user and one assistant message.
pub struct Dispatcher {
    driver: Arc<dyn ProviderDriver>,
    cooldowns: CooldownTracker,
    settings: DispatchSettings,
    clock: Arc<dyn Clock>,
    shutdown: CancellationToken,
}

impl Dispatcher {
    /// Dispatcher over `driver` with a fresh cooldown map and wall-clock time.
    pub fn new(driver: Arc<dyn ProviderDriver>, settings: DispatchSettings) -> Self {
        Self {
            driver,
            cooldowns: CooldownTracker::new(),
            settings,
            clock: Arc::new(SystemClock),
            shutdown: CancellationToken::new(),
        }
    }

    /// Use `clock` for cooldown bookkeeping and message timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Share an existing cooldown map.
    pub fn with_cooldowns(mut self, cooldowns: CooldownTracker) -> Self {
        self.cooldowns = cooldowns;
        self
    }

    /// Abandon in-flight submissions when `token` is cancelled.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Cooldown state shared by all submissions.
    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    /// Active settings.
    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Token observed by in-flight submissions.
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Submit `prompt`, failing over across `providers` until one succeeds.
    ///
    /// `providers` should already be in ascending priority order. Providers
    /// matching `preferred` are tried first.
    ///
    /// # Errors
    ///
    /// - [`DispatchErrorKind::NoProviders`] when no provider is enabled
    /// - [`DispatchErrorKind::AllProvidersFailed`] when every eligible
    ///   provider was skipped or exhausted
    /// - [`DispatchErrorKind::Cancelled`] when shutdown interrupts a call or
    ///   backoff
    #[instrument(
        skip(self, prompt, history, providers),
        fields(prompt_chars = prompt.len(), providers = providers.len())
    )]
    pub async fn submit(
        &self,
        prompt: &str,
        history: &mut ConversationHistory,
        providers: &[Provider],
        preferred: Option<&str>,
    ) -> Result<Submission, DispatchError> {
        let ordered = order_providers(providers, preferred, *self.settings.preference_match());
        if ordered.is_empty() {
            warn!("No enabled providers");
            return Err(DispatchError::new(DispatchErrorKind::NoProviders));
        }

        let context = build_context(
            self.settings.system_prompt(),
            history,
            *self.settings.history_window(),
            prompt,
        );
        let mut last_error: Option<ProviderError> = None;

        for provider in ordered {
            let id = provider.id().as_str();
            if let Some(remaining) = self.cooldowns.remaining(id, self.clock.now()).await {
                info!(
                    provider = id,
                    remaining_secs = remaining.num_seconds(),
                    "Skipping provider, cooling down"
                );
                continue;
            }

            let outcome = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return Err(self.cancelled()),
                outcome = self.retry(provider, &context) => outcome,
            };

            let err = match outcome {
                Ok((attempt, completion)) => {
                    let at = self.clock.now();
                    history.append_exchange(prompt, completion.text.clone(), id, at);
                    info!(
                        provider = id,
                        attempt,
                        chars = completion.text.len(),
                        "Provider succeeded"
                    );
                    return Ok(Submission::new(id, completion));
                }
                Err(err) => err,
            };

            if let Some(retry_after_secs) = err.retry_after_secs() {
                self.cooldowns
                    .disable(id, self.clock.now(), retry_after_secs)
                    .await;
                warn!(provider = id, retry_after_secs, "Rate limited, provider disabled");
            } else if !err.is_retryable() {
                warn!(
                    provider = id,
                    error = %err.summary(),
                    "Provider unusable, not retrying"
                );
            } else {
                warn!(provider = id, error = %err.summary(), "Retry budget exhausted");
            }
            last_error = Some(err);
        }

        warn!(
            last = %last_error.as_ref().map(|e| e.summary()).unwrap_or_default(),
            "All providers failed"
        );
        Err(DispatchError::new(DispatchErrorKind::AllProvidersFailed {
            last: last_error,
        }))
    }

    /// Call `provider` until it succeeds or the retry budget runs out.
    ///
    /// Rate limits and configuration failures end the loop at once. On
    /// success the 1-based attempt number comes back with the completion.
    async fn retry(
        &self,
        provider: &Provider,
        context: &PromptContext,
    ) -> Result<(u32, Completion), ProviderError> {
        let driver = &self.driver;
        let id = provider.id().as_str();
        let mut attempt: u32 = 0;

        Retry::spawn(self.settings.retry().delays(), move || {
            attempt += 1;
            let n = attempt;
            async move {
                match driver.call(provider, context).await {
                    Ok(completion) => Ok((n, completion)),
                    Err(err) if err.retry_after_secs().is_some() || !err.is_retryable() => {
                        Err(RetryError::Permanent(err))
                    }
                    Err(err) => {
                        warn!(provider = id, attempt = n, error = %err.summary(), "Attempt failed");
                        Err(RetryError::Transient {
                            err,
                            retry_after: None,
                        })
                    }
                }
            }
        })
        .await
    }

    fn cancelled(&self) -> DispatchError {
        info!("Submission cancelled by shutdown");
        DispatchError::new(DispatchErrorKind::Cancelled)
    }
}
