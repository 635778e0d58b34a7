//! Submission-level error types.

use crate::ProviderError;

/// Why a whole submission failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DispatchErrorKind {
    /// No enabled provider is configured
    #[display("No providers configured")]
    NoProviders,
    /// Every eligible provider was skipped or failed
    #[display("All providers failed. Last: {}", last.as_ref().map(|e| e.summary()).unwrap_or_else(|| "none attempted".to_string()))]
    AllProvidersFailed {
        /// Last underlying failure, absent when every provider was cooling down
        last: Option<ProviderError>,
    },
    /// The submission was abandoned on shutdown
    #[display("Submission cancelled")]
    Cancelled,
}

/// Dispatch error with location tracking.
///
/// # Examples
///
/// ```
/// use paperclip_error::{DispatchError, DispatchErrorKind};
///
/// let err = DispatchError::new(DispatchErrorKind::NoProviders);
/// assert!(format!("{}", err).contains("No providers"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Dispatch Error: {} at line {} in {}", kind, line, file)]
pub struct DispatchError {
    /// The kind of error that occurred
    pub kind: DispatchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DispatchError {
    /// Create a new dispatch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DispatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The last provider failure, if any provider was attempted.
    pub fn last_provider_error(&self) -> Option<&ProviderError> {
        match &self.kind {
            DispatchErrorKind::AllProvidersFailed { last } => last.as_ref(),
            _ => None,
        }
    }
}
