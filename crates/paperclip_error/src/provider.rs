//! Provider call failures and retry classification.

use std::fmt;

/// Maximum number of characters of a provider response shown in messages.
pub const EXCERPT_CHARS: usize = 400;

/// Truncate `text` to at most `max_chars` characters, marking the cut.
///
/// # Examples
///
/// ```
/// use paperclip_error::excerpt;
///
/// assert_eq!(excerpt("short", 10), "short");
/// assert_eq!(excerpt("abcdefgh", 3), "abc...");
/// ```
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Outcome classes for a single provider round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// A field the adapter cannot work without is absent from the provider record.
    MissingField {
        /// Provider id
        provider: String,
        /// Name of the missing field
        field: &'static str,
    },
    /// The provider answered 429 and asked us to back off.
    RateLimited {
        /// Cooldown requested by the provider, in seconds
        retry_after_secs: u64,
        /// Response body excerpt
        message: String,
    },
    /// The request never produced a response (connect, timeout, body read).
    Network(String),
    /// Any non-200, non-429 status.
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Full response body
        body: String,
    },
    /// A 200 response whose body could not be decoded.
    MalformedResponse(String),
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::MissingField { provider, field } => {
                write!(f, "Provider '{}' is missing required field '{}'", provider, field)
            }
            ProviderErrorKind::RateLimited {
                retry_after_secs,
                message,
            } => write!(
                f,
                "Rate limited (retry after {}s): {}",
                retry_after_secs,
                excerpt(message, EXCERPT_CHARS)
            ),
            ProviderErrorKind::Network(msg) => write!(f, "Network error: {}", msg),
            ProviderErrorKind::HttpStatus { status_code, body } => {
                write!(f, "HTTP {}: {}", status_code, excerpt(body, EXCERPT_CHARS))
            }
            ProviderErrorKind::MalformedResponse(msg) => {
                write!(f, "Malformed response: {}", excerpt(msg, EXCERPT_CHARS))
            }
        }
    }
}

impl ProviderErrorKind {
    /// Transient failures consume a retry attempt and may be retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderErrorKind::Network(_)
                | ProviderErrorKind::HttpStatus { .. }
                | ProviderErrorKind::MalformedResponse(_)
        )
    }

    /// Cooldown requested by the provider, if this is a rate-limit signal.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            ProviderErrorKind::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

/// Provider failure with source location tracking.
///
/// # Examples
///
/// ```
/// use paperclip_error::{ProviderError, ProviderErrorKind, RetryableError};
///
/// let err = ProviderError::new(ProviderErrorKind::HttpStatus {
///     status_code: 503,
///     body: "overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("HTTP 503"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Bounded, location-free description suitable for showing to a user.
    pub fn summary(&self) -> String {
        excerpt(&self.kind.to_string(), EXCERPT_CHARS)
    }
}

/// Trait for errors that carry retry guidance.
///
/// Rate-limit signals are not retryable on the same provider; they carry a
/// cooldown instead.
pub trait RetryableError {
    /// Returns true if the same provider may be tried again.
    fn is_retryable(&self) -> bool;

    /// Cooldown to apply before the provider is eligible again.
    fn retry_after_secs(&self) -> Option<u64> {
        None
    }
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.is_transient()
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.kind.retry_after_secs()
    }
}
