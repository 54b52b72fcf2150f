//! # Response Runtime Library
//!
//! Exposes the runtime's modules for testing. The process entry point is
//! the `main.rs` binary.
//!
//! - `container/` - configuration loading and executor wiring
//! - `health` - periodic readiness probe with optional auto-recovery
//! - `runtime` - startup, panic button and graceful shutdown

pub mod container;
pub mod health;
pub mod runtime;

pub use container::{load_config, ConfigError, RuntimeConfig, RuntimeContainer};
pub use health::{HealthMonitor, HealthStatus};
pub use runtime::ResponseRuntime;
