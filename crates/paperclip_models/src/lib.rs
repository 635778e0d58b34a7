//! Provider adapters for PaperClip.
//!
//! Two wire shapes are supported:
//!
//! - **Gemini** (`models/{model}:generateContent`, `x-goog-api-key`), sending
//!   only the current prompt
//! - **Chat completions** (`/v1/chat/completions`, bearer token), used for
//!   OpenRouter and other OpenAI-compatible services, sending the whole
//!   conversation
//!
//! [`ProviderAdapter`] picks the shape per provider; [`HttpProviderDriver`]
//! performs the round trip and applies the shared status policy.
//!
//! # Example
//!
//! ```no_run
//! use paperclip_core::{ChatTurn, PromptContext, Provider, Role};
//! use paperclip_interface::ProviderDriver;
//! use paperclip_models::{DEFAULT_REQUEST_TIMEOUT, HttpProviderDriver};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = HttpProviderDriver::new(DEFAULT_REQUEST_TIMEOUT)?;
//! let provider = Provider::builder().id("openrouter").api_key("sk-...").build()?;
//! let context = PromptContext::new(vec![ChatTurn::new(Role::User, "Hello")], "Hello");
//! let completion = driver.call(&provider, &context).await?;
//! println!("{}", completion.text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod chat_completions;
mod driver;
mod gemini;
mod metrics;
mod request;
mod value;

pub use adapter::ProviderAdapter;
pub use chat_completions::{
    CHAT_DEFAULT_BASE_URL, CHAT_DEFAULT_MAX_TOKENS, CHAT_DEFAULT_MODEL, ChatCompletionsAdapter,
};
pub use driver::{DEFAULT_REQUEST_TIMEOUT, HttpProviderDriver};
pub use gemini::{
    GEMINI_API_KEY_HEADER, GEMINI_DEFAULT_BASE_URL, GEMINI_DEFAULT_MAX_TOKENS, GeminiAdapter,
};
pub use metrics::LlmMetrics;
pub use request::PreparedRequest;
