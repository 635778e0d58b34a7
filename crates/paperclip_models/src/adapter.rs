//! Closed set of provider wire shapes.

use crate::{ChatCompletionsAdapter, GeminiAdapter, PreparedRequest};
use paperclip_core::{PromptContext, Provider};
use paperclip_error::ProviderError;
use serde_json::Value;

/// Request/response shape selected for a provider.
///
/// # Examples
///
/// ```
/// use paperclip_core::{Provider, ProviderType};
/// use paperclip_models::ProviderAdapter;
///
/// let gem = Provider::builder().id("g").kind(ProviderType::Gemini).build().unwrap();
/// let or = Provider::builder().id("o").build().unwrap();
///
/// assert_eq!(ProviderAdapter::for_provider(&gem).shape_name(), "gemini");
/// assert_eq!(ProviderAdapter::for_provider(&or).shape_name(), "chat_completions");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderAdapter {
    /// Google Generative Language `generateContent`
    Gemini(GeminiAdapter),
    /// OpenAI-compatible chat completions
    ChatCompletions(ChatCompletionsAdapter),
}

impl ProviderAdapter {
    /// Pick the shape for `provider`.
    pub fn for_provider(provider: &Provider) -> Self {
        if provider.is_gemini() {
            ProviderAdapter::Gemini(GeminiAdapter)
        } else {
            ProviderAdapter::ChatCompletions(ChatCompletionsAdapter)
        }
    }

    /// Short label for logs and metrics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            ProviderAdapter::Gemini(_) => "gemini",
            ProviderAdapter::ChatCompletions(_) => "chat_completions",
        }
    }

    /// Endpoint URL the request will be sent to.
    pub fn endpoint(&self, provider: &Provider) -> Result<String, ProviderError> {
        match self {
            ProviderAdapter::Gemini(adapter) => adapter.endpoint(provider),
            ProviderAdapter::ChatCompletions(adapter) => Ok(adapter.endpoint(provider)),
        }
    }

    /// Build the request. Fails only on unusable provider configuration.
    pub fn prepare(
        &self,
        provider: &Provider,
        context: &PromptContext,
    ) -> Result<PreparedRequest, ProviderError> {
        match self {
            ProviderAdapter::Gemini(adapter) => adapter.prepare(provider, context),
            ProviderAdapter::ChatCompletions(adapter) => Ok(adapter.prepare(provider, context)),
        }
    }

    /// Normalize a decoded 200 body into text. Never fails.
    pub fn parse(&self, data: &Value) -> String {
        match self {
            ProviderAdapter::Gemini(adapter) => adapter.parse(data),
            ProviderAdapter::ChatCompletions(adapter) => adapter.parse(data),
        }
    }
}
