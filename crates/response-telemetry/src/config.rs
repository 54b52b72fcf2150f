//! Telemetry configuration from environment variables.

use serde::Serialize;
use std::env;

const DEFAULT_SERVICE_NAME: &str = "facility-response";
const DEFAULT_INSTANCE_ID: &str = "00";

/// Configuration for logging and metrics.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryConfig {
    /// Service name in log records
    pub service_name: String,

    /// Orchestrator instance identifier
    pub instance_id: String,

    /// Log level filter (trace, debug, info, warn, error) or directive string
    pub log_level: String,

    /// Whether to emit logs to stdout
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            instance_id: DEFAULT_INSTANCE_ID.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FR_SERVICE_NAME`: Service name (default: facility-response)
    /// - `FR_INSTANCE_ID`: Instance ID (default: 00)
    /// - `FR_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `FR_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `FR_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("FR_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            instance_id: lookup("FR_INSTANCE_ID").unwrap_or_else(|| DEFAULT_INSTANCE_ID.to_string()),

            log_level: lookup("FR_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("FR_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("FR_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Service name including the instance id, unless it is the default
    pub fn full_service_name(&self) -> String {
        if self.instance_id == DEFAULT_INSTANCE_ID {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.instance_id)
        }
    }
}
