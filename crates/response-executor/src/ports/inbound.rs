//! Driving Ports (API - Inbound)

use crate::config::SystemConfig;
use crate::domain::{ExecutionReport, ResponseRequest, SystemMode};
use crate::error::{ConfigError, ExecutorResult, InitError};
use async_trait::async_trait;

/// Response Executor API
#[async_trait]
pub trait ResponseExecutorApi: Send + Sync {
    /// Run readiness checks and start the dispatch worker.
    ///
    /// A no-op success when already initialized.
    async fn init(&self) -> Result<(), InitError>;

    /// Execute one response sequence under the dispatch lock
    async fn dispatch(&self, request: ResponseRequest) -> ExecutorResult<()>;

    /// Schedule a maximal lockdown and return immediately.
    ///
    /// The emergency flags are set whenever the override is enabled, even
    /// if no lockdown can be scheduled (not initialized, or the worker has
    /// stopped). Returns the scheduled response id, or `None` when nothing
    /// was scheduled.
    fn trigger_emergency(&self, level: u8) -> Option<u64>;

    /// Most recently published report; zero-valued before the first dispatch
    fn last_report(&self) -> ExecutionReport;

    /// Initialized, not in emergency mode, and hardware answers right now
    async fn is_ready(&self) -> bool;

    /// Replace the operator configuration atomically
    fn update_config(&self, config: SystemConfig) -> Result<(), ConfigError>;

    fn system_status(&self) -> SystemMode;

    /// Reverse subsystem effects and stop the dispatch worker
    async fn cleanup(&self);
}
