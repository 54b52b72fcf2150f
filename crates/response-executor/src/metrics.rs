//! # Response Executor Metrics
//!
//! Prometheus metrics for dispatch outcomes and the panic button.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! response-executor = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `response_dispatches_total` - Counter of dispatches (by response type and outcome)
//! - `response_step_failures_total` - Counter of failed sequence steps (by step)
//! - `response_emergency_triggers_total` - Counter of panic-button activations
//! - `response_emergency_level` - Gauge of the current emergency level (0 when clear)
//! - `response_dispatch_duration_seconds` - Histogram of dispatch wall-clock time

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_gauge, register_histogram, register_int_counter, CounterVec,
    Gauge, Histogram, IntCounter,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Dispatches, labeled by response type and outcome
    pub static ref DISPATCHES: CounterVec = register_counter_vec!(
        "response_dispatches_total",
        "Total number of response dispatches",
        &["response_type", "outcome"]
    )
    .expect("Failed to create DISPATCHES metric");

    /// Failed sequence steps, labeled by step
    pub static ref STEP_FAILURES: CounterVec = register_counter_vec!(
        "response_step_failures_total",
        "Total number of failed sequence steps",
        &["step"]
    )
    .expect("Failed to create STEP_FAILURES metric");

    /// Panic-button activations
    pub static ref EMERGENCY_TRIGGERS: IntCounter = register_int_counter!(
        "response_emergency_triggers_total",
        "Total number of emergency triggers"
    )
    .expect("Failed to create EMERGENCY_TRIGGERS metric");

    /// Current emergency level
    pub static ref EMERGENCY_LEVEL: Gauge = register_gauge!(
        "response_emergency_level",
        "Current emergency level (0 when no emergency is active)"
    )
    .expect("Failed to create EMERGENCY_LEVEL metric");

    /// Dispatch wall-clock time
    pub static ref DISPATCH_DURATION: Histogram = register_histogram!(
        "response_dispatch_duration_seconds",
        "Time spent executing a response sequence",
        vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0]
    )
    .expect("Failed to create DISPATCH_DURATION metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a finished dispatch
#[cfg(feature = "metrics")]
pub fn record_dispatch(response_type: &str, outcome: &str, duration_secs: f64) {
    DISPATCHES
        .with_label_values(&[response_type, outcome])
        .inc();
    DISPATCH_DURATION.observe(duration_secs);
}

/// Record a failed sequence step
#[cfg(feature = "metrics")]
pub fn record_step_failure(step: &str) {
    STEP_FAILURES.with_label_values(&[step]).inc();
}

/// Record a panic-button activation at `level`
#[cfg(feature = "metrics")]
pub fn record_emergency_trigger(level: u8) {
    EMERGENCY_TRIGGERS.inc();
    EMERGENCY_LEVEL.set(f64::from(level));
}

/// Update the emergency level gauge
#[cfg(feature = "metrics")]
pub fn set_emergency_level(level: u8) {
    EMERGENCY_LEVEL.set(f64::from(level));
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_dispatch(_response_type: &str, _outcome: &str, _duration_secs: f64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_step_failure(_step: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_emergency_trigger(_level: u8) {}

#[cfg(not(feature = "metrics"))]
pub fn set_emergency_level(_level: u8) {}
