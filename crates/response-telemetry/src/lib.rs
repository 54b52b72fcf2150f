//! # Response Telemetry
//!
//! Logging and metrics bootstrap for the facility response orchestrator.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with an env filter and either
//!   human-readable or JSON output
//! - **Metrics**: Prometheus text exposition of the default registry, plus
//!   process-level runtime metrics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use response_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! // ... run the orchestrator
//! println!("{}", response_telemetry::encode_metrics()?);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FR_SERVICE_NAME` | `facility-response` | Service name in log records |
//! | `FR_INSTANCE_ID` | `00` | Orchestrator instance identifier |
//! | `FR_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `FR_CONSOLE_OUTPUT` | `true` | Emit logs to stdout |
//! | `FR_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};
pub use metrics::{encode_metrics, HEALTH_CHECKS, UPTIME_SECONDS};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize log subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to encode Prometheus metrics: {0}")]
    MetricsEncode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging and touch runtime metrics.
///
/// Returns a guard that should be held for the lifetime of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let logging = init_logging(&config)?;
    metrics::register_runtime_metrics();

    tracing::info!(
        service = %config.full_service_name(),
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.full_service_name(),
        logging,
    })
}

/// Keeps telemetry active; logs on drop.
pub struct TelemetryGuard {
    service_name: String,
    logging: LoggingGuard,
}

impl TelemetryGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Whether console output is JSON
    pub fn json_logs(&self) -> bool {
        self.logging.is_json()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

/// Span with orchestrator context.
///
/// ```rust,ignore
/// let _span = response_span!("health_check", interval_secs = 30).entered();
/// ```
#[macro_export]
macro_rules! response_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, subsystem = "facility-response", $($field)*)
    };
}
