//! Executor configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on `max_retry_attempts`
pub const MAX_RETRY_LIMIT: u8 = 10;

/// Operator tuning, swapped whole by `update_config`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Default dispatch deadline (seconds)
    pub max_response_time_secs: u16,
    /// Advisory retry budget
    pub max_retry_attempts: u8,
    /// Whether the panic button may schedule lockdowns
    pub enable_emergency_override: bool,
    /// Whether the health monitor may dispatch recovery on its own
    pub enable_auto_recovery: bool,
    /// Health monitor period (seconds)
    pub health_check_interval_secs: u16,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            max_response_time_secs: 300,
            max_retry_attempts: 3,
            enable_emergency_override: true,
            enable_auto_recovery: false,
            health_check_interval_secs: 30,
        }
    }
}

impl SystemConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_response_time_secs == 0 {
            return Err(ConfigError::ZeroResponseTime);
        }
        if self.health_check_interval_secs == 0 {
            return Err(ConfigError::ZeroHealthCheckInterval);
        }
        if self.max_retry_attempts > MAX_RETRY_LIMIT {
            return Err(ConfigError::TooManyRetries {
                got: self.max_retry_attempts,
                max: MAX_RETRY_LIMIT,
            });
        }
        Ok(())
    }

    pub fn max_response_time(&self) -> Duration {
        Duration::from_secs(u64::from(self.max_response_time_secs))
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.health_check_interval_secs))
    }
}

/// Construction-time settings
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    pub system: SystemConfig,
    /// Pause between services during failover
    pub failover_delay: Duration,
    /// Capacity of the emergency dispatch queue
    pub emergency_queue_capacity: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            system: SystemConfig::default(),
            failover_delay: Duration::from_millis(500),
            emergency_queue_capacity: 16,
        }
    }
}

impl ExecutorConfig {
    /// Configuration for tests and simulations: no failover pause
    pub fn for_testing() -> Self {
        Self {
            failover_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
