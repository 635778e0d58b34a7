//! Minimum spacing between submissions.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Rejects submissions that arrive too soon after the previous response.
///
/// Only completed responses move the gate; failed submissions do not.
///
/// # Examples
///
/// ```
/// use chrono::{Duration as ChronoDuration, Utc};
/// use paperclip::SubmissionGate;
/// use std::time::Duration;
///
/// let mut gate = SubmissionGate::new(Duration::from_secs(2));
/// let t0 = Utc::now();
/// assert!(gate.allows(t0));
///
/// gate.record_response(t0);
/// assert!(!gate.allows(t0 + ChronoDuration::seconds(1)));
/// assert!(gate.allows(t0 + ChronoDuration::seconds(2)));
/// ```
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    min_spacing: Duration,
    last_response: Option<DateTime<Utc>>,
}

impl SubmissionGate {
    /// Gate with the given minimum spacing.
    pub fn new(min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            last_response: None,
        }
    }

    /// Whether a submission at `now` may proceed.
    pub fn allows(&self, now: DateTime<Utc>) -> bool {
        match self.last_response {
            None => true,
            Some(last) => match (now - last).to_std() {
                Ok(elapsed) => elapsed >= self.min_spacing,
                // Clock moved backwards
                Err(_) => false,
            },
        }
    }

    /// Note a completed response at `at`.
    pub fn record_response(&mut self, at: DateTime<Utc>) {
        self.last_response = Some(at);
    }

    /// Time of the last completed response.
    pub fn last_response(&self) -> Option<DateTime<Utc>> {
        self.last_response
    }
}
