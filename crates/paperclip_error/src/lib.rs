//! Error types for the PaperClip prompt dispatcher.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Provider failures are values, not panics: a rate limit is
//! [`ProviderErrorKind::RateLimited`] with its requested cooldown, and the
//! dispatcher branches on the kind.
//!
//! # Examples
//!
//! ```
//! use paperclip_error::{PaperclipResult, HttpError};
//!
//! fn fetch_data() -> PaperclipResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_data().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod error;
mod http;
mod provider;
mod storage;

pub use config::ConfigError;
pub use dispatch::{DispatchError, DispatchErrorKind};
pub use error::{PaperclipError, PaperclipErrorKind, PaperclipResult};
pub use http::HttpError;
pub use provider::{EXCERPT_CHARS, ProviderError, ProviderErrorKind, RetryableError, excerpt};
pub use storage::{StorageError, StorageErrorKind};
