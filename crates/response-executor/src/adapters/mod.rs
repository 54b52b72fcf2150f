//! # Adapters Layer
//!
//! Controller implementations for the outbound ports.
//!
//! - `LoggingControllers`: every operation is a structured log event that succeeds
//! - `RecordingControllers`: call log, scripted failures and delays for tests and drills

mod logging;
mod recording;

pub use logging::LoggingControllers;
pub use recording::{ControllerCall, RecordingControllers};
