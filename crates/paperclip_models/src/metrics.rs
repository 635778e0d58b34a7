//! Metrics for provider calls.
//!
//! OpenTelemetry instruments recorded once per round trip. Without an
//! installed meter provider these are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use paperclip_interface::FailureCategory;
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Request, failure and latency instruments labeled by provider.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total provider requests
    pub requests: Counter<u64>,
    /// Failed provider requests
    pub errors: Counter<u64>,
    /// Provider call duration in seconds
    pub duration: Histogram<f64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("paperclip_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total provider requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed provider requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("Provider call duration")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a completed round trip, successful or not.
    pub fn record_request(&self, provider: &str, shape: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("shape", shape.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed round trip.
    pub fn record_error(&self, provider: &str, shape: &str, category: FailureCategory) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("shape", shape.to_string()),
            KeyValue::new("error_type", category.as_ref().to_string()),
        ];
        self.errors.add(1, labels);
    }
}

impl Default for LlmMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}
