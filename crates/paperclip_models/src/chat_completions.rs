//! OpenAI-compatible `/v1/chat/completions` request and response shapes.
//!
//! Used for OpenRouter and any other provider that is not Gemini-shaped.

use crate::PreparedRequest;
use crate::value::{truthy, value_to_text};
use paperclip_core::{PromptContext, Provider};
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// Base URL used when a provider declares none.
pub const CHAT_DEFAULT_BASE_URL: &str = "https://openrouter.ai";

/// Model requested when the provider declares none.
pub const CHAT_DEFAULT_MODEL: &str = "openrouter/auto";

/// Output token cap when the provider declares none.
pub const CHAT_DEFAULT_MAX_TOKENS: u32 = 8192;

/// Adapter for chat-completions providers.
///
/// Sends the full assembled conversation as a `messages` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatCompletionsAdapter;

impl ChatCompletionsAdapter {
    /// Resolve the endpoint URL for `provider`.
    ///
    /// Bases that already carry a versioned path or end in
    /// `/chat/completions` are used as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use paperclip_core::Provider;
    /// use paperclip_models::ChatCompletionsAdapter;
    ///
    /// let bare = Provider::builder().id("or").base_url("https://openrouter.ai/").build().unwrap();
    /// assert_eq!(
    ///     ChatCompletionsAdapter.endpoint(&bare),
    ///     "https://openrouter.ai/v1/chat/completions"
    /// );
    ///
    /// let full = Provider::builder()
    ///     .id("local")
    ///     .base_url("http://localhost:8080/chat/completions")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(
    ///     ChatCompletionsAdapter.endpoint(&full),
    ///     "http://localhost:8080/chat/completions"
    /// );
    /// ```
    pub fn endpoint(&self, provider: &Provider) -> String {
        let base = provider.base_url().trim_end_matches('/');
        let base = if base.is_empty() {
            CHAT_DEFAULT_BASE_URL
        } else {
            base
        };
        if base.contains("/v1") || base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    /// Build the request for `provider` from `context`.
    #[instrument(skip(self, provider, context), fields(provider = %provider.id(), turns = context.turns().len()))]
    pub fn prepare(&self, provider: &Provider, context: &PromptContext) -> PreparedRequest {
        let url = self.endpoint(provider);
        let model = provider.model_name().unwrap_or(CHAT_DEFAULT_MODEL);
        let max_tokens = provider.max_tokens().unwrap_or(CHAT_DEFAULT_MAX_TOKENS);
        debug!(%url, model, max_tokens, "Prepared chat-completions request");
        PreparedRequest {
            url,
            headers: vec![(
                "Authorization",
                format!("Bearer {}", provider.api_key()),
            )],
            body: json!({
                "model": model,
                "messages": context.turns(),
                "temperature": 0.0,
                "max_tokens": max_tokens,
            }),
        }
    }

    /// Normalize a decoded chat-completions response into text.
    ///
    /// Prefers `choices[0].message.content`, then `choices[0].text`, then the
    /// choice rendered as JSON. A body without `choices` is rendered whole.
    ///
    /// # Examples
    ///
    /// ```
    /// use paperclip_models::ChatCompletionsAdapter;
    /// use serde_json::json;
    ///
    /// let body = json!({"choices": [{"message": {"role": "assistant", "content": "42"}}]});
    /// assert_eq!(ChatCompletionsAdapter.parse(&body), "42");
    ///
    /// let body = json!({"choices": [{"text": "legacy"}]});
    /// assert_eq!(ChatCompletionsAdapter.parse(&body), "legacy");
    /// ```
    pub fn parse(&self, data: &Value) -> String {
        let Some(choice) = data
            .get("choices")
            .filter(|c| truthy(c))
            .and_then(|c| c.get(0))
        else {
            return value_to_text(data);
        };

        if let Some(content) = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .filter(|c| truthy(c))
        {
            return value_to_text(content);
        }

        match choice.get("text").filter(|t| truthy(t)) {
            Some(text) => value_to_text(text),
            None => choice.to_string(),
        }
    }
}
