//! Error types for the Response Executor
//!
//! Every error maps onto a numeric result code so that the value stored in
//! `ExecutionReport::overall_result` stays comparable across response types.

use crate::domain::{ResponseType, SequenceStep};
use thiserror::Error;

/// Overall result of a fully successful dispatch
pub const RESULT_SUCCESS: i32 = 0;

/// Dispatch exceeded its deadline
pub const RESULT_TIMEOUT: i32 = -6;

/// Unknown or unsupported response type
pub const RESULT_CRITICAL_FAILURE: i32 = -99;

/// Failure reported by an external subsystem controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Required hardware did not respond
    #[error("hardware unavailable: {0}")]
    HardwareUnavailable(String),

    /// Network backend rejected the operation
    #[error("network operation failed: {0}")]
    NetworkFailure(String),

    /// Controller refused the operation
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Any other controller-side failure
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Readiness check failures raised by `init`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// The dispatch worker could not be hosted
    #[error("dispatch lock/worker initialization failed: {reason}")]
    LockInitFailed { reason: String },

    /// Hardware readiness probe reported not ready
    #[error("hardware subsystem is not ready")]
    HardwareUnready,

    /// Network subsystem failed to initialize
    #[error("network subsystem initialization failed: {0}")]
    NetworkInitFailed(ControllerError),

    /// Access control subsystem failed to initialize
    #[error("access control initialization failed: {0}")]
    AccessInitFailed(ControllerError),
}

impl InitError {
    /// Numeric code of the failed readiness check
    pub fn code(&self) -> i32 {
        match self {
            InitError::LockInitFailed { .. } => -1,
            InitError::HardwareUnready => -2,
            InitError::NetworkInitFailed(_) => -3,
            InitError::AccessInitFailed(_) => -4,
        }
    }
}

/// Dispatch failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// `init` has not succeeded, or `cleanup` has run since
    #[error("response executor is not initialized")]
    NotInitialized,

    /// A sequence step failed; carries the first failing step
    #[error("{response_type} sequence failed at step {step}")]
    StepFailed {
        response_type: ResponseType,
        step: SequenceStep,
    },

    /// The response type has no sequence handler
    #[error("no sequence handler for response type {0}")]
    UnsupportedType(ResponseType),

    /// The sequence did not finish before its deadline
    #[error("dispatch exceeded its {timeout_secs}s deadline")]
    Timeout { timeout_secs: u64 },
}

impl DispatchError {
    /// Numeric result code, as recorded in `ExecutionReport::overall_result`
    pub fn code(&self) -> i32 {
        match self {
            DispatchError::NotInitialized => -1,
            DispatchError::StepFailed { step, .. } => step.failure_code(),
            DispatchError::UnsupportedType(_) => RESULT_CRITICAL_FAILURE,
            DispatchError::Timeout { .. } => RESULT_TIMEOUT,
        }
    }
}

/// Result type for dispatch operations
pub type ExecutorResult<T> = Result<T, DispatchError>;

/// Raw response type code outside the known range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown response type code {0}")]
pub struct UnknownResponseType(pub u8);

impl UnknownResponseType {
    pub fn code(&self) -> i32 {
        RESULT_CRITICAL_FAILURE
    }
}

/// Rejected configuration updates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max response time must be at least one second")]
    ZeroResponseTime,

    #[error("health check interval must be at least one second")]
    ZeroHealthCheckInterval,

    #[error("max retry attempts {got} exceeds limit {max}")]
    TooManyRetries { got: u8, max: u8 },
}
