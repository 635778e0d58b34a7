//! Shared classification types.

use paperclip_error::ProviderErrorKind;
use serde::{Deserialize, Serialize};

/// Coarse failure class of a provider call, used for logs and metric labels.
///
/// # Examples
///
/// ```
/// use paperclip_error::ProviderErrorKind;
/// use paperclip_interface::FailureCategory;
///
/// let kind = ProviderErrorKind::Network("reset".to_string());
/// assert_eq!(FailureCategory::from(&kind), FailureCategory::Transient);
/// assert_eq!(FailureCategory::RateLimited.as_ref(), "rate_limited");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Provider record cannot be used as configured
    Config,
    /// Provider asked for a cooldown
    RateLimited,
    /// Network error, unexpected status or undecodable body
    Transient,
}

impl From<&ProviderErrorKind> for FailureCategory {
    fn from(kind: &ProviderErrorKind) -> Self {
        match kind {
            ProviderErrorKind::MissingField { .. } => FailureCategory::Config,
            ProviderErrorKind::RateLimited { .. } => FailureCategory::RateLimited,
            ProviderErrorKind::Network(_)
            | ProviderErrorKind::HttpStatus { .. }
            | ProviderErrorKind::MalformedResponse(_) => FailureCategory::Transient,
        }
    }
}
