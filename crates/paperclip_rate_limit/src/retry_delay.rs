//! Extraction of retry-after hints from provider error payloads.
//!
//! Google-style APIs attach a `google.rpc.RetryInfo` detail to 429 bodies:
//!
//! ```json
//! {"error": {"details": [
//!     {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "13s"}
//! ]}}
//! ```
//!
//! Two delay encodings are understood: plain seconds with an optional
//! fraction (`"13.5s"`, floored) and ISO-8601 style `"PT1H2M3S"`.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Cooldown applied when a payload carries no usable retry hint.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 10;

static SECONDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:\.\d+)?s$").expect("Valid seconds regex"));

static ISO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("Valid ISO duration regex")
});

/// Parse a single delay string into whole seconds.
///
/// Returns `None` when the string matches neither encoding.
///
/// # Examples
///
/// ```
/// use paperclip_rate_limit::parse_delay_str;
///
/// assert_eq!(parse_delay_str("13s"), Some(13));
/// assert_eq!(parse_delay_str("13.9s"), Some(13));
/// assert_eq!(parse_delay_str("PT1H2M3S"), Some(3723));
/// assert_eq!(parse_delay_str("soon"), None);
/// ```
pub fn parse_delay_str(delay: &str) -> Option<u64> {
    if let Some(caps) = SECONDS_RE.captures(delay) {
        return caps.get(1)?.as_str().parse().ok();
    }
    let caps = ISO_RE.captures(delay)?;
    let component = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;
    Some(
        hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds),
    )
}

/// Find the retry delay, in seconds, carried by an error payload.
///
/// Never fails: anything unexpected yields [`DEFAULT_RETRY_DELAY_SECS`].
///
/// # Examples
///
/// ```
/// use paperclip_rate_limit::parse_retry_delay;
/// use serde_json::json;
///
/// let body = json!({"error": {"details": [
///     {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "PT2M"}
/// ]}});
/// assert_eq!(parse_retry_delay(&body), 120);
/// assert_eq!(parse_retry_delay(&json!("not an object")), 10);
/// ```
#[instrument(skip(payload))]
pub fn parse_retry_delay(payload: &Value) -> u64 {
    let Some(details) = payload
        .get("error")
        .and_then(|e| e.get("details"))
        .and_then(Value::as_array)
    else {
        debug!("No error details in payload, using default retry delay");
        return DEFAULT_RETRY_DELAY_SECS;
    };

    for detail in details {
        let is_retry_info = detail
            .get("@type")
            .and_then(Value::as_str)
            .is_some_and(|t| t.contains("RetryInfo"));
        if !is_retry_info {
            continue;
        }
        let Some(delay) = detail.get("retryDelay").and_then(Value::as_str).map(str::trim) else {
            continue;
        };
        if let Some(secs) = parse_delay_str(delay) {
            debug!(delay, secs, "Parsed retry delay");
            return secs;
        }
        debug!(delay, "Unrecognized retry delay encoding");
    }

    DEFAULT_RETRY_DELAY_SECS
}
