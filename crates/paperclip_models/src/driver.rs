//! HTTP transport shared by every provider shape.

use crate::{LlmMetrics, PreparedRequest, ProviderAdapter};
use async_trait::async_trait;
use paperclip_core::{Completion, PromptContext, Provider};
use paperclip_error::{HttpError, ProviderError, ProviderErrorKind};
use paperclip_interface::{CallResult, FailureCategory, ProviderDriver};
use paperclip_rate_limit::parse_retry_delay;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Default bound on a single provider round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// [`ProviderDriver`] that talks to real provider endpoints over HTTPS.
///
/// One POST per call. Status policy:
/// - 429 is a rate limit; the body is searched for a retry hint
/// - any other non-200 is an HTTP status failure
/// - a 200 that is not JSON is a malformed response
#[derive(Debug, Clone)]
pub struct HttpProviderDriver {
    client: Client,
}

impl HttpProviderDriver {
    /// Create a driver whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        debug!(?timeout, "Creating HTTP provider driver");
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            error!(error = ?e, "Failed to build HTTP client");
            HttpError::new(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    #[instrument(skip(self, adapter, request), fields(url = %request.url))]
    async fn execute(
        &self,
        adapter: &ProviderAdapter,
        request: &PreparedRequest,
    ) -> CallResult {
        let mut builder = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request failed before a response arrived");
            ProviderError::new(ProviderErrorKind::Network(e.to_string()))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(error = %e, %status, "Failed to read response body");
            ProviderError::new(ProviderErrorKind::Network(e.to_string()))
        })?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let payload = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);
            let retry_after_secs = parse_retry_delay(&payload);
            warn!(retry_after_secs, "Provider returned 429");
            return Err(ProviderError::new(ProviderErrorKind::RateLimited {
                retry_after_secs,
                message: text,
            }));
        }

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Provider returned error status");
            return Err(ProviderError::new(ProviderErrorKind::HttpStatus {
                status_code: status.as_u16(),
                body: text,
            }));
        }

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Provider returned a body that is not JSON");
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "{}: {}",
                e, text
            )))
        })?;

        let normalized = adapter.parse(&data);
        debug!(chars = normalized.len(), "Normalized provider response");
        Ok(Completion::new(normalized, data))
    }
}

#[async_trait]
impl ProviderDriver for HttpProviderDriver {
    #[instrument(skip(self, provider, context), fields(provider = %provider.id()))]
    async fn call(&self, provider: &Provider, context: &PromptContext) -> CallResult {
        let adapter = ProviderAdapter::for_provider(provider);
        let shape = adapter.shape_name();
        let request = adapter.prepare(provider, context)?;
        info!(
            provider = %provider.id(),
            shape,
            model = provider.model_name().unwrap_or("default"),
            url = %request.url,
            "Trying provider"
        );

        let started = Instant::now();
        let result = self.execute(&adapter, &request).await;

        let metrics = LlmMetrics::get();
        metrics.record_request(provider.id(), shape, started.elapsed().as_secs_f64());
        if let Err(e) = &result {
            metrics.record_error(provider.id(), shape, FailureCategory::from(&e.kind));
        }
        result
    }

    fn driver_name(&self) -> &'static str {
        "http"
    }
}
