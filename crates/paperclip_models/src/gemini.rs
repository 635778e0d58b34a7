//! Google Generative Language (`generateContent`) request and response shapes.

use crate::PreparedRequest;
use crate::value::{first_truthy, truthy, value_to_text};
use paperclip_core::{PromptContext, Provider};
use paperclip_error::{ProviderError, ProviderErrorKind};
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// Base URL used when a Gemini provider declares none.
pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Output token cap when the provider declares none.
pub const GEMINI_DEFAULT_MAX_TOKENS: u32 = 4096;

/// Header carrying the API key.
pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";

/// Adapter for Gemini-shaped providers.
///
/// Only the current prompt is sent; prior turns are not forwarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeminiAdapter;

impl GeminiAdapter {
    /// `models/{model}` unless the model already carries the prefix.
    pub fn model_path(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        }
    }

    /// Resolve the `generateContent` URL for `provider`.
    ///
    /// # Examples
    ///
    /// ```
    /// use paperclip_core::{Provider, ProviderType};
    /// use paperclip_models::GeminiAdapter;
    ///
    /// let provider = Provider::builder()
    ///     .id("gem")
    ///     .kind(ProviderType::Gemini)
    ///     .base_url("https://generativelanguage.googleapis.com/v1beta/")
    ///     .model("gemini-2.0-flash")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     GeminiAdapter.endpoint(&provider).unwrap(),
    ///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
    /// );
    /// ```
    pub fn endpoint(&self, provider: &Provider) -> Result<String, ProviderError> {
        let model = require_model(provider)?;
        let base = provider.base_url().trim_end_matches('/');
        let base = if base.is_empty() {
            GEMINI_DEFAULT_BASE_URL
        } else {
            base
        };
        if base.contains(":generate") || base.contains("models/") {
            Ok(base.to_string())
        } else {
            Ok(format!("{}/{}:generateContent", base, Self::model_path(model)))
        }
    }

    /// Build the request for `provider` from `context`.
    #[instrument(skip(self, provider, context), fields(provider = %provider.id()))]
    pub fn prepare(
        &self,
        provider: &Provider,
        context: &PromptContext,
    ) -> Result<PreparedRequest, ProviderError> {
        let url = self.endpoint(provider)?;
        let max_tokens = provider.max_tokens().unwrap_or(GEMINI_DEFAULT_MAX_TOKENS);
        debug!(%url, max_tokens, "Prepared Gemini request");
        Ok(PreparedRequest {
            url,
            headers: vec![(GEMINI_API_KEY_HEADER, provider.api_key().clone())],
            body: json!({
                "contents": [{"parts": [{"text": context.prompt()}]}],
                "generationConfig": {
                    "temperature": 0.0,
                    "maxOutputTokens": max_tokens,
                },
            }),
        })
    }

    /// Normalize a decoded Gemini response into text.
    ///
    /// Recognized shapes, in order: `candidates[0].content.parts[0].text`,
    /// a flat `content`/`output`/`text` on the first candidate, a top-level
    /// `output` (string or list of fragments), a top-level `result`.
    /// Anything else is rendered as JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use paperclip_models::GeminiAdapter;
    /// use serde_json::json;
    ///
    /// let body = json!({"candidates": [{"content": {"parts": [{"text": "fn main() {}"}]}}]});
    /// assert_eq!(GeminiAdapter.parse(&body), "fn main() {}");
    ///
    /// let body = json!({"output": [{"content": "a"}, "b", {"text": ""}]});
    /// assert_eq!(GeminiAdapter.parse(&body), "a\nb");
    /// ```
    pub fn parse(&self, data: &Value) -> String {
        let Some(object) = data.as_object() else {
            return value_to_text(data);
        };

        if let Some(candidate) = object
            .get("candidates")
            .filter(|c| truthy(c))
            .and_then(|c| c.get(0))
        {
            return parse_candidate(candidate);
        }

        if let Some(output) = object.get("output") {
            return match output {
                Value::String(s) => s.clone(),
                Value::Array(fragments) => fragments
                    .iter()
                    .filter_map(|fragment| match fragment {
                        Value::Object(_) => {
                            first_truthy(fragment, &["content", "text"]).map(value_to_text)
                        }
                        Value::String(s) => Some(s.clone()),
                        _ => None,
                    })
                    .filter(|piece| !piece.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n"),
                other => other.to_string(),
            };
        }

        if !object.contains_key("candidates") {
            if let Some(result) = object.get("result") {
                return result.to_string();
            }
        }

        data.to_string()
    }
}

fn parse_candidate(candidate: &Value) -> String {
    if let Some(parts) = candidate
        .get("content")
        .filter(|c| c.is_object())
        .and_then(|c| c.get("parts"))
    {
        return parts
            .as_array()
            .and_then(|p| p.first())
            .and_then(|first| first.get("text"))
            .map(value_to_text)
            .unwrap_or_default();
    }
    first_truthy(candidate, &["content", "output", "text"])
        .map(value_to_text)
        .unwrap_or_default()
}

fn require_model(provider: &Provider) -> Result<&str, ProviderError> {
    provider.model_name().ok_or_else(|| {
        ProviderError::new(ProviderErrorKind::MissingField {
            provider: provider.id().clone(),
            field: "model",
        })
    })
}
