//! # Orchestrator Runtime
//!
//! ## Startup Sequence
//!
//! 1. Initialize the executor (readiness checks, dispatch worker)
//! 2. Spawn the health monitor
//! 3. Serve panic-button triggers until shutdown
//!
//! ## Shutdown Sequence
//!
//! 1. Signal background tasks to stop
//! 2. Clean up the executor (restore access, clear rules, stop worker)
//! 3. Log the final report and metrics snapshot

use crate::container::RuntimeContainer;
use crate::health::HealthMonitor;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use response_executor::{ExecutionReport, ResponseExecutor, ResponseExecutorApi, MAX_SEVERITY};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How long shutdown waits for background tasks
const TASK_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// The orchestrator runtime.
pub struct ResponseRuntime {
    /// Executor and configuration.
    container: Arc<RuntimeContainer>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
    /// Background tasks, joined at shutdown.
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ResponseRuntime {
    pub fn new(container: RuntimeContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn executor(&self) -> &ResponseExecutor {
        &self.container.executor
    }

    /// Receiver that flips to `true` when shutdown begins
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Initialize the executor and start background tasks.
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  Facility Response Orchestrator v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        match serde_json::to_string(&self.container.config.system) {
            Ok(json) => info!(config = %json, "Executor configuration"),
            Err(e) => warn!(error = %e, "Could not render executor configuration"),
        }

        self.executor()
            .init()
            .await
            .context("Executor readiness checks failed")?;

        let monitor = HealthMonitor::new(
            self.executor().clone(),
            self.container.config.recovery_after(),
        );
        let handle = tokio::spawn(monitor.run(self.shutdown_signal()));
        self.tasks.lock().push(handle);

        info!("Orchestrator running");
        Ok(())
    }

    /// Panic button: schedule a lockdown at the highest level
    pub fn panic_button(&self) -> Option<u64> {
        let scheduled = self.executor().trigger_emergency(MAX_SEVERITY);
        match scheduled {
            Some(response_id) => warn!(response_id, "Panic button pressed, lockdown scheduled"),
            None => warn!("Panic button pressed, nothing scheduled"),
        }
        scheduled
    }

    /// Stop background tasks, clean up the executor and return the final report.
    pub async fn shutdown(&self) -> ExecutionReport {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let tasks: Vec<_> = self.tasks.lock().drain(..).collect();
        for task in tasks {
            if tokio::time::timeout(TASK_DRAIN_TIMEOUT, task).await.is_err() {
                warn!("Background task did not stop in time");
            }
        }

        self.executor().cleanup().await;

        let report = self.executor().last_report();
        match serde_json::to_string(&report) {
            Ok(json) => info!(report = %json, "Final execution report"),
            Err(e) => warn!(error = %e, "Could not render final report"),
        }
        match response_telemetry::encode_metrics() {
            Ok(metrics) => info!("Final metrics snapshot:\n{}", metrics),
            Err(e) => warn!(error = %e, "Could not encode metrics"),
        }

        info!("Shutdown complete");
        report
    }
}
