use once_cell::sync::Lazy;
use prometheus::{
    opts, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder,
};

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}

const LATENCY_BUCKETS: [f64; 10] = [0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("http_request_duration_seconds", "HTTP request latency")
            .buckets(LATENCY_BUCKETS.to_vec()),
        &["method", "path"],
    )
    .unwrap()
});

// ── Payload validation ──────────────────────────────────────────────────────
pub static PAYLOAD_VALIDATIONS: Lazy<IntCounterVec> = counter_vec!(
    "payload_validations_total",
    "Request bodies seen by the validator, by outcome",
    &["outcome"]
);
pub static PAYLOAD_VIOLATIONS: Lazy<IntCounter> =
    counter!("payload_violations_total", "Individual field checks that failed");

/// What the validator decided for one request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Empty,
    Rejected,
    Malformed,
    TooLarge,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Accepted => "accepted",
            Outcome::Empty => "empty",
            Outcome::Rejected => "rejected",
            Outcome::Malformed => "malformed",
            Outcome::TooLarge => "too_large",
        }
    }
}

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(PAYLOAD_VALIDATIONS.clone()))?;
    r.register(Box::new(PAYLOAD_VIOLATIONS.clone()))?;
    Ok(())
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn observe_validation(outcome: Outcome, violations: usize) {
    PAYLOAD_VALIDATIONS
        .with_label_values(&[outcome.as_str()])
        .inc();
    PAYLOAD_VIOLATIONS.inc_by(violations as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all() {
        let registry = Registry::new_custom(Some("test".into()), None).unwrap();
        register_all(&registry).unwrap();
        observe_validation(Outcome::Accepted, 0);
        observe_http("POST", "/api/echo", 200, 0.002);

        let text = gather_metrics(&registry);
        assert!(text.contains("test_payload_validations_total"));
        assert!(text.contains("test_http_requests_total"));
        assert!(text.contains("# TYPE"));
    }

    #[test]
    fn test_violations_are_counted() {
        let before = PAYLOAD_VIOLATIONS.get();
        observe_validation(Outcome::Rejected, 3);
        assert!(PAYLOAD_VIOLATIONS.get() >= before + 3);
    }
}
