//! # Runtime Configuration
//!
//! Operator tuning for the executor plus process-level settings, with
//! environment overrides.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `FR_MAX_RESPONSE_TIME` | `system.max_response_time_secs` | 300 |
//! | `FR_MAX_RETRIES` | `system.max_retry_attempts` | 3 |
//! | `FR_EMERGENCY_OVERRIDE` | `system.enable_emergency_override` | true |
//! | `FR_AUTO_RECOVERY` | `system.enable_auto_recovery` | false |
//! | `FR_HEALTH_CHECK_INTERVAL` | `system.health_check_interval_secs` | 30 |
//! | `FR_FAILOVER_DELAY_MS` | `failover_delay_ms` | 500 |
//! | `FR_EMERGENCY_QUEUE` | `emergency_queue_capacity` | 16 |

use response_executor::{ExecutorConfig, SystemConfig, EMERGENCY_LOCKDOWN_DURATION_SECS};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Executor tuning, also adjustable at runtime.
    pub system: SystemConfig,
    /// Pause between services during failover.
    pub failover_delay_ms: u64,
    /// Emergency dispatch queue capacity.
    pub emergency_queue_capacity: usize,
    /// How long an emergency may last before auto-recovery kicks in.
    pub recovery_after_secs: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let executor = ExecutorConfig::default();
        Self {
            system: executor.system,
            failover_delay_ms: executor.failover_delay.as_millis() as u64,
            emergency_queue_capacity: executor.emergency_queue_capacity,
            recovery_after_secs: EMERGENCY_LOCKDOWN_DURATION_SECS,
        }
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.system.validate()?;
        if self.emergency_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(())
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            system: self.system.clone(),
            failover_delay: Duration::from_millis(self.failover_delay_ms),
            emergency_queue_capacity: self.emergency_queue_capacity,
        }
    }

    pub fn recovery_after(&self) -> Duration {
        Duration::from_secs(u64::from(self.recovery_after_secs))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid executor configuration: {0}")]
    Executor(#[from] response_executor::ConfigError),

    #[error("emergency queue capacity must be at least 1")]
    ZeroQueueCapacity,
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<RuntimeConfig, ConfigError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable source.
///
/// Unparseable values are logged and the default is kept.
pub fn load_config_from<F>(lookup: F) -> Result<RuntimeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = RuntimeConfig::default();

    override_from(&lookup, "FR_MAX_RESPONSE_TIME", &mut config.system.max_response_time_secs);
    override_from(&lookup, "FR_MAX_RETRIES", &mut config.system.max_retry_attempts);
    override_flag(&lookup, "FR_EMERGENCY_OVERRIDE", &mut config.system.enable_emergency_override);
    override_flag(&lookup, "FR_AUTO_RECOVERY", &mut config.system.enable_auto_recovery);
    override_from(
        &lookup,
        "FR_HEALTH_CHECK_INTERVAL",
        &mut config.system.health_check_interval_secs,
    );
    override_from(&lookup, "FR_FAILOVER_DELAY_MS", &mut config.failover_delay_ms);
    override_from(&lookup, "FR_EMERGENCY_QUEUE", &mut config.emergency_queue_capacity);

    config.validate()?;
    Ok(config)
}

fn override_from<F, T>(lookup: &F, var: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(var) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => {
            *target = value;
            info!(var, value = %raw, "Loaded override from environment");
        }
        Err(_) => warn!(var, value = %raw, "Ignoring unparseable override"),
    }
}

fn override_flag<F>(lookup: &F, var: &str, target: &mut bool)
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return;
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => *target = true,
        "0" | "false" | "no" | "off" => *target = false,
        _ => warn!(var, value = %raw, "Ignoring unparseable flag"),
    }
}
