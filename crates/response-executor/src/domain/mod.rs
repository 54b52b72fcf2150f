//! Domain module for the Response Executor
//!
//! ## Core Modules
//! - zones: 32-slot facility zone bitmask
//! - request: Response requests and response types
//! - validation: Structural request checks
//! - step: Sequence steps and per-dispatch step tracking
//! - report: Execution reports and the off-to-the-side report builder
//! - mode: Facility operating mode

pub mod mode;
pub mod report;
pub mod request;
pub mod step;
pub mod validation;
pub mod zones;

pub use mode::SystemMode;
pub use report::{ExecutionReport, ReportBuilder, ERROR_DETAILS_MAX_LEN, STATUS_SUMMARY_MAX_LEN};
pub use request::{
    ResponseRequest, ResponseType, EMERGENCY_LOCKDOWN_DURATION_SECS, EMERGENCY_TRIGGER_EVENT,
    MAX_AUTH_LEVEL, MAX_SEVERITY, MIN_AUTH_LEVEL, MIN_SEVERITY, TRIGGER_EVENT_MAX_LEN,
};
pub use step::{SequenceStep, SequenceTracker};
pub use validation::{validate, validate_parameters, ValidationError};
pub use zones::{ZoneMask, Zones};

/// Current wall-clock time as Unix epoch milliseconds
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
