//! Top-level error wrapper types.

use crate::{ConfigError, DispatchError, HttpError, ProviderError, StorageError};

/// Every error the PaperClip crates can surface.
///
/// # Examples
///
/// ```
/// use paperclip_error::{HttpError, PaperclipError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: PaperclipError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PaperclipErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Session storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Single provider failure
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Submission failure
    #[from(DispatchError)]
    Dispatch(DispatchError),
}

/// PaperClip error with kind discrimination.
///
/// # Examples
///
/// ```
/// use paperclip_error::{ConfigError, PaperclipResult};
///
/// fn might_fail() -> PaperclipResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("PaperClip Error: {}", _0)]
pub struct PaperclipError(Box<PaperclipErrorKind>);

impl PaperclipError {
    /// Create a new error from a kind.
    pub fn new(kind: PaperclipErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PaperclipErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to PaperclipErrorKind
impl<T> From<T> for PaperclipError
where
    T: Into<PaperclipErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for PaperClip operations.
pub type PaperclipResult<T> = std::result::Result<T, PaperclipError>;
