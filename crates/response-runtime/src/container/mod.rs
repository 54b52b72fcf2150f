//! # Executor Container
//!
//! Holds the configured executor and the controllers it drives.

pub mod config;

pub use config::{load_config, load_config_from, ConfigError, RuntimeConfig};

use response_executor::adapters::LoggingControllers;
use response_executor::{ResponseExecutor, SubsystemControllers};
use std::sync::Arc;
use tracing::info;

/// Configured executor with its wiring.
pub struct RuntimeContainer {
    pub config: RuntimeConfig,
    pub executor: ResponseExecutor,
}

impl RuntimeContainer {
    pub fn new(config: RuntimeConfig, controllers: SubsystemControllers) -> Self {
        let executor = ResponseExecutor::new(config.executor_config(), controllers);
        Self { config, executor }
    }

    /// Wire the executor to log-only controllers
    pub fn with_logging_controllers(config: RuntimeConfig) -> Self {
        info!("Wiring executor to logging controllers");
        Self::new(
            config,
            SubsystemControllers::from_shared(Arc::new(LoggingControllers::new())),
        )
    }
}
