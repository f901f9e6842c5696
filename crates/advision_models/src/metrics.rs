//! Metrics for generation API calls.
//!
//! OpenTelemetry instruments labelled by operation (`script` or `image`) and
//! model. They are no-ops until a meter provider is installed globally.

use advision_error::GeminiErrorKind;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<GenerationMetrics> = OnceLock::new();

/// Metrics for script and image generation requests.
#[derive(Clone)]
pub struct GenerationMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total generation requests
    pub requests: Counter<u64>,
    /// Failed generation requests
    pub errors: Counter<u64>,
    /// Request duration in seconds
    pub duration: Histogram<f64>,
}

impl GenerationMetrics {
    fn init() -> Self {
        let meter = global::meter("advision_generation");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("generation.requests")
                .with_description("Total generation API requests")
                .build(),
            errors: meter
                .u64_counter("generation.errors")
                .with_description("Failed generation API requests")
                .build(),
            duration: meter
                .f64_histogram("generation.duration")
                .with_unit("seconds")
                .with_description("Generation API call duration")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a completed request.
    pub fn record_request(&self, operation: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("operation", operation.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, operation: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("operation", operation.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }
}

/// Classify an error for metrics labelling.
///
/// Returns one of: "rate_limit", "auth", "server", "invalid_request",
/// "network", "empty_response", "decode", "config".
pub fn classify_error(kind: &GeminiErrorKind) -> &'static str {
    match kind {
        GeminiErrorKind::HttpError { status_code, .. } => match *status_code {
            429 => "rate_limit",
            401 | 403 => "auth",
            500..=599 => "server",
            _ => "invalid_request",
        },
        GeminiErrorKind::ApiRequest(_) => "network",
        GeminiErrorKind::EmptyResponse | GeminiErrorKind::NoImageData => "empty_response",
        GeminiErrorKind::ResponseParse(_) | GeminiErrorKind::Base64Decode(_) => "decode",
        GeminiErrorKind::MissingApiKey | GeminiErrorKind::ClientCreation(_) => "config",
    }
}
