//! # response-executor
//!
//! Response dispatch and execution-tracking engine for a secured facility.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Serialized Dispatch**: One response sequence runs at a time, ordinary or emergency
//! - **Sequence Handlers**: Fixed, ordered controller calls per response type
//! - **Partial-Failure Tracking**: Continue-on-failure, first-failure-wins result codes
//! - **Panic Button**: Fire-and-forget maximal lockdown via a dedicated dispatch worker
//!
//! ## Architecture
//!
//! ```text
//! caller ──dispatch()──→ ResponseExecutor ──lock──→ ResponseSequence ──→ Controllers
//!                              ↑                          │
//!                              │                          ↓
//!  trigger_emergency() ──→ [emergency queue]        ReportBuilder ──publish──→ last_report()
//!                              │
//!                              └── dispatch worker (same lock-protected path)
//! ```
//!
//! ## Result Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | -1..-4 | Failing step position (first failure wins) |
//! | -6 | Dispatch deadline exceeded |
//! | -99 | Unknown or unsupported response type |
//!
//! ## Example
//!
//! ```rust,ignore
//! use response_executor::{ResponseExecutor, ExecutorConfig, ResponseExecutorApi};
//! use response_executor::adapters::LoggingControllers;
//!
//! let executor = ResponseExecutor::new(
//!     ExecutorConfig::default(),
//!     SubsystemControllers::from_shared(Arc::new(LoggingControllers::new())),
//! );
//!
//! executor.init().await?;
//! executor.dispatch(ResponseRequest::new(ResponseType::Lockdown, 8, ZoneMask::ALL, "breach")).await?;
//! let report = executor.last_report();
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod sequences;
pub mod service;

mod state;
mod worker;

pub use config::{ExecutorConfig, SystemConfig};
pub use domain::{
    now_millis, validate, validate_parameters, ExecutionReport, ReportBuilder, ResponseRequest,
    ResponseType, SequenceStep, SequenceTracker, SystemMode, ValidationError, ZoneMask,
    EMERGENCY_LOCKDOWN_DURATION_SECS, MAX_SEVERITY, MIN_SEVERITY,
};
pub use error::{
    ConfigError, ControllerError, ControllerResult, DispatchError, ExecutorResult, InitError,
    UnknownResponseType,
};
pub use ports::inbound::ResponseExecutorApi;
pub use ports::outbound::{
    AccessController, BackupController, ContainmentController, EvacuationController,
    HardwareProbe, NetworkController, RecoveryController, ServiceController,
    SubsystemControllers, SurveillanceController,
};
pub use sequences::{sequence_for, ResponseSequence, SequenceContext};
pub use service::ResponseExecutor;
