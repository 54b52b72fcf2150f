//! # Health Monitor
//!
//! Periodic readiness probe. When auto-recovery is enabled and an emergency
//! has outlived its lockdown window, the monitor dispatches a full recovery.

use response_executor::{
    now_millis, ResponseExecutor, ResponseExecutorApi, ResponseRequest, ResponseType,
    SystemMode, ZoneMask,
};
use response_telemetry::{log_response_event, response_span};
use response_telemetry::metrics::{record_health_check, UPTIME_SECONDS};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::Instrument;

const AUTO_RECOVERY_EVENT: &str = "automatic recovery after emergency window";

/// Result of one health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub ready: bool,
    pub mode: SystemMode,
    /// How long the current emergency has lasted
    pub emergency_for: Option<Duration>,
    /// Response id of a recovery dispatched by this probe
    pub recovery_dispatched: Option<u64>,
}

pub struct HealthMonitor {
    executor: ResponseExecutor,
    recovery_after: Duration,
    started: Instant,
}

impl HealthMonitor {
    pub fn new(executor: ResponseExecutor, recovery_after: Duration) -> Self {
        Self {
            executor,
            recovery_after,
            started: Instant::now(),
        }
    }

    /// Probe until shutdown is signalled.
    ///
    /// The interval is re-read from the executor each round so config
    /// updates take effect.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        log_response_event!(info, "health", "Health monitor started");
        loop {
            let interval = self.executor.config().health_check_interval();
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let span = response_span!("health_check", interval_secs = interval.as_secs());
                    self.check_once().instrument(span).await;
                }
                _ = shutdown.changed() => {
                    log_response_event!(info, "health", "Shutdown signal received");
                    break;
                }
            }
        }
    }

    /// Run one probe, dispatching recovery if due
    pub async fn check_once(&self) -> HealthStatus {
        let ready = self.executor.is_ready().await;
        let mode = self.executor.system_status();
        let emergency_for = self
            .executor
            .emergency_since()
            .map(|since| Duration::from_millis(now_millis().saturating_sub(since)));

        record_health_check(ready);
        UPTIME_SECONDS.set(self.started.elapsed().as_secs_f64());

        if ready {
            log_response_event!(debug, "health", "Readiness probe passed", mode = %mode);
        } else {
            log_response_event!(
                warn,
                "health",
                "Executor not ready",
                mode = %mode,
                emergency = ?emergency_for
            );
        }

        let recovery_dispatched = match emergency_for {
            Some(elapsed) if self.recovery_due(elapsed) => self.dispatch_recovery().await,
            _ => None,
        };

        HealthStatus {
            ready,
            mode,
            emergency_for,
            recovery_dispatched,
        }
    }

    fn recovery_due(&self, emergency_for: Duration) -> bool {
        self.executor.config().enable_auto_recovery && emergency_for > self.recovery_after
    }

    async fn dispatch_recovery(&self) -> Option<u64> {
        let request =
            ResponseRequest::new(ResponseType::FullRecovery, 1, ZoneMask::ALL, AUTO_RECOVERY_EVENT);
        let response_id = request.response_id();

        log_response_event!(warn, "health", "Emergency window elapsed, dispatching recovery");
        match self.executor.dispatch(request).await {
            Ok(()) => {
                log_response_event!(info, "health", "Automatic recovery completed", response_id);
                Some(response_id)
            }
            Err(e) => {
                log_response_event!(
                    error,
                    "health",
                    "Automatic recovery failed",
                    response_id,
                    error = %e
                );
                None
            }
        }
    }
}
