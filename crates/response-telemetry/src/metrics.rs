//! Prometheus exposition for the orchestrator.
//!
//! Executor metrics register themselves in the default registry when the
//! executor's `metrics` feature is on; this module adds process-level
//! metrics next to them and renders everything in text format.

use lazy_static::lazy_static;
use prometheus::{register_gauge, register_int_counter_vec, Encoder, Gauge, IntCounterVec, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Seconds since the runtime started
    pub static ref UPTIME_SECONDS: Gauge = register_gauge!(
        "response_runtime_uptime_seconds",
        "Seconds since the orchestrator runtime started"
    )
    .expect("metric creation failed");

    /// Health probes, labeled by outcome (ready/not_ready)
    pub static ref HEALTH_CHECKS: IntCounterVec = register_int_counter_vec!(
        "response_runtime_health_checks_total",
        "Health probes run by the runtime",
        &["outcome"]
    )
    .expect("metric creation failed");
}

/// Force registration of the runtime metrics
pub fn register_runtime_metrics() {
    lazy_static::initialize(&UPTIME_SECONDS);
    lazy_static::initialize(&HEALTH_CHECKS);
}

/// Record one health probe
pub fn record_health_check(ready: bool) {
    let outcome = if ready { "ready" } else { "not_ready" };
    HEALTH_CHECKS.with_label_values(&[outcome]).inc();
}

/// Encode the default registry as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}
