//! Response Executor Service - Core dispatch logic
//!
//! Every dispatch, ordinary or emergency, runs under one async lock. The
//! report is built off to the side and published only once complete, so
//! readers see either the previous or the next full report.

use crate::config::{ExecutorConfig, SystemConfig};
use crate::domain::{
    now_millis, validate_parameters, ExecutionReport, ReportBuilder, ResponseRequest,
    SequenceTracker, SystemMode,
};
use crate::error::{ConfigError, DispatchError, ExecutorResult, InitError};
use crate::metrics;
use crate::ports::inbound::ResponseExecutorApi;
use crate::ports::outbound::SubsystemControllers;
use crate::sequences::{sequence_for, SequenceContext};
use crate::state::SubsystemState;
use crate::worker::EmergencyQueue;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Facility response executor.
///
/// Cheap to clone; every clone drives the same executor.
#[derive(Clone)]
pub struct ResponseExecutor {
    inner: Arc<ExecutorInner>,
}

pub(crate) struct ExecutorInner {
    controllers: SubsystemControllers,
    config: RwLock<SystemConfig>,
    failover_delay: Duration,
    emergency_queue_capacity: usize,
    state: SubsystemState,
}

impl ResponseExecutor {
    /// Create an uninitialized executor
    pub fn new(config: ExecutorConfig, controllers: SubsystemControllers) -> Self {
        Self {
            inner: Arc::new(ExecutorInner {
                controllers,
                config: RwLock::new(config.system),
                failover_delay: config.failover_delay,
                emergency_queue_capacity: config.emergency_queue_capacity,
                state: SubsystemState::new(),
            }),
        }
    }

    pub fn config(&self) -> SystemConfig {
        self.inner.config.read().clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.state.is_initialized()
    }

    pub fn emergency_mode(&self) -> bool {
        self.inner.state.emergency_mode.load(Ordering::SeqCst)
    }

    /// Severity of the active emergency, 0 when clear
    pub fn current_level(&self) -> u8 {
        self.inner.state.current_level.load(Ordering::SeqCst)
    }

    /// Epoch millis of the last emergency trigger, `None` when clear
    pub fn emergency_since(&self) -> Option<u64> {
        match self.inner.state.emergency_since.load(Ordering::SeqCst) {
            0 => None,
            since => Some(since),
        }
    }

    pub fn validate_parameters(&self, request: &ResponseRequest) -> bool {
        validate_parameters(request)
    }
}

impl std::fmt::Debug for ResponseExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseExecutor")
            .field("initialized", &self.is_initialized())
            .field("emergency_mode", &self.emergency_mode())
            .field("mode", &self.system_status())
            .finish()
    }
}

#[async_trait]
impl ResponseExecutorApi for ResponseExecutor {
    async fn init(&self) -> Result<(), InitError> {
        let inner = &self.inner;
        if inner.state.is_initialized() {
            return Ok(());
        }

        let _guard = inner.state.dispatch_lock.lock().await;
        if inner.state.is_initialized() {
            return Ok(());
        }

        let runtime = Handle::try_current().map_err(|e| InitError::LockInitFailed {
            reason: e.to_string(),
        })?;

        if !inner.controllers.hardware.check_ready().await {
            error!("Hardware readiness probe failed");
            return Err(InitError::HardwareUnready);
        }

        inner
            .controllers
            .network
            .init()
            .await
            .map_err(InitError::NetworkInitFailed)?;

        if let Err(e) = inner.controllers.access.init().await {
            // Undo network init so nothing stays half-initialized
            if let Err(cleanup_err) = inner.controllers.network.cleanup_rules().await {
                warn!(error = %cleanup_err, "Network rollback after access init failure failed");
            }
            return Err(InitError::AccessInitFailed(e));
        }

        let queue = EmergencyQueue::start(
            runtime,
            Arc::downgrade(inner),
            inner.emergency_queue_capacity,
        );
        *inner.state.emergency_queue.lock() = Some(queue);
        inner.state.reset(true);

        info!("Response executor initialized");
        Ok(())
    }

    async fn dispatch(&self, request: ResponseRequest) -> ExecutorResult<()> {
        self.inner.dispatch(request).await
    }

    fn trigger_emergency(&self, level: u8) -> Option<u64> {
        let inner = &self.inner;

        if !inner.config.read().enable_emergency_override {
            warn!(level, "Emergency override disabled, ignoring trigger");
            return None;
        }

        let level = level.clamp(crate::domain::MIN_SEVERITY, crate::domain::MAX_SEVERITY);
        let now = now_millis();
        inner.state.enter_emergency(level, now);
        metrics::record_emergency_trigger(level);

        let queue = inner.state.emergency_queue.lock();
        let Some(queue) = queue.as_ref() else {
            warn!(level, "Emergency flags set, executor not initialized so no lockdown scheduled");
            return None;
        };

        let request = ResponseRequest::emergency_lockdown(inner.state.next_emergency_id(now));
        let response_id = request.response_id();
        if !queue.schedule(request) {
            error!(level, response_id, "Emergency flags set but worker stopped, lockdown not scheduled");
            return None;
        }

        warn!(level, response_id, "EMERGENCY TRIGGERED - lockdown scheduled");
        Some(response_id)
    }

    fn last_report(&self) -> ExecutionReport {
        self.inner.state.last_report.read().clone()
    }

    async fn is_ready(&self) -> bool {
        self.is_initialized()
            && !self.emergency_mode()
            && self.inner.controllers.hardware.check_ready().await
    }

    fn update_config(&self, config: SystemConfig) -> Result<(), ConfigError> {
        config.validate()?;
        info!(
            max_response_time_secs = config.max_response_time_secs,
            enable_emergency_override = config.enable_emergency_override,
            enable_auto_recovery = config.enable_auto_recovery,
            "Configuration updated"
        );
        *self.inner.config.write() = config;
        Ok(())
    }

    fn system_status(&self) -> SystemMode {
        *self.inner.state.mode.read()
    }

    async fn cleanup(&self) {
        let inner = &self.inner;
        if !inner.state.is_initialized() {
            return;
        }

        let _guard = inner.state.dispatch_lock.lock().await;
        if !inner.state.is_initialized() {
            return;
        }

        let c = &inner.controllers;
        if let Err(e) = c.access.restore_normal_access().await {
            warn!(error = %e, "Failed to restore normal access");
        }
        if let Err(e) = c.network.cleanup_rules().await {
            warn!(error = %e, "Failed to clear network rules");
        }
        if let Err(e) = c.service.stop_emergency_services().await {
            warn!(error = %e, "Failed to stop emergency services");
        }

        // Dropping the sender stops the worker once it drains
        inner.state.emergency_queue.lock().take();
        inner.state.reset(false);
        metrics::set_emergency_level(0);

        info!("Response executor cleaned up");
    }
}

impl ExecutorInner {
    /// Dispatch path shared by callers and the emergency worker
    pub(crate) async fn dispatch(&self, request: ResponseRequest) -> ExecutorResult<()> {
        if !self.state.is_initialized() {
            return Err(DispatchError::NotInitialized);
        }

        let _guard = self.state.dispatch_lock.lock().await;

        // cleanup may have won the race for the lock
        if !self.state.is_initialized() {
            return Err(DispatchError::NotInitialized);
        }

        self.run_locked(request).await
    }

    #[instrument(
        name = "dispatch",
        skip(self, request),
        fields(
            dispatch_id = %Uuid::new_v4(),
            response_id = request.timestamp,
            response_type = %request.response_type,
        )
    )]
    async fn run_locked(&self, request: ResponseRequest) -> ExecutorResult<()> {
        let started = Instant::now();
        let report = ReportBuilder::start(request.response_id(), now_millis());
        let mut tracker = SequenceTracker::new();

        let timeout_secs = match request.timeout_secs {
            0 => u64::from(self.config.read().max_response_time_secs),
            secs => u64::from(secs),
        };

        debug!(severity = request.severity, zones = %request.target_zones, "Dispatch started");

        let (summary, outcome) = match sequence_for(request.response_type) {
            None => (
                format!("response type {} is not supported", request.response_type),
                Err(DispatchError::UnsupportedType(request.response_type)),
            ),
            Some(sequence) => {
                let ctx = SequenceContext {
                    controllers: &self.controllers,
                    failover_delay: self.failover_delay,
                };
                let finished = tokio::time::timeout(
                    Duration::from_secs(timeout_secs),
                    sequence.execute(&request, &ctx, &mut tracker),
                )
                .await;

                let outcome = match (finished, tracker.first_failure()) {
                    (Err(_), _) => Err(DispatchError::Timeout { timeout_secs }),
                    (Ok(()), Some(step)) => Err(DispatchError::StepFailed {
                        response_type: request.response_type,
                        step: step.clone(),
                    }),
                    (Ok(()), None) => Ok(()),
                };
                (summarize(sequence.summary(), &tracker, &outcome), outcome)
            }
        };

        let overall_result = match &outcome {
            Ok(()) => crate::error::RESULT_SUCCESS,
            Err(e) => e.code(),
        };
        let error_details = match &outcome {
            Ok(()) | Err(DispatchError::StepFailed { .. }) => tracker.error_details(),
            Err(e) if tracker.failed() > 0 => format!("{e}; {}", tracker.error_details()),
            Err(e) => e.to_string(),
        };

        let mode = self.advance_mode(&request, outcome.is_ok());

        let report = report
            .counts(&tracker)
            .status_summary(summary)
            .error_details(error_details)
            .finish(now_millis(), overall_result, mode);
        self.state.publish(report);

        let elapsed = started.elapsed();
        metrics::record_dispatch(
            request.response_type.as_str(),
            outcome_label(&outcome),
            elapsed.as_secs_f64(),
        );

        match &outcome {
            Ok(()) => info!(
                succeeded = tracker.succeeded(),
                warnings = tracker.warning_count(),
                elapsed_ms = elapsed.as_millis() as u64,
                mode = %mode,
                "Dispatch completed"
            ),
            Err(e) => warn!(
                code = overall_result,
                error = %e,
                succeeded = tracker.succeeded(),
                failed = tracker.failed(),
                elapsed_ms = elapsed.as_millis() as u64,
                mode = %mode,
                "Dispatch finished with errors"
            ),
        }

        outcome
    }

    /// Apply the dispatch outcome to the operating mode
    fn advance_mode(&self, request: &ResponseRequest, clean: bool) -> SystemMode {
        let mut mode = self.state.mode.write();
        *mode = mode.after_dispatch(request.response_type, clean);

        if *mode == SystemMode::Recovery && clean {
            self.state.clear_emergency();
            metrics::set_emergency_level(0);
        }
        *mode
    }
}

fn summarize(
    sequence: &str,
    tracker: &SequenceTracker,
    outcome: &ExecutorResult<()>,
) -> String {
    let mut summary = match outcome {
        Ok(()) => format!(
            "{sequence} completed: {}/{} steps succeeded",
            tracker.succeeded(),
            tracker.attempted()
        ),
        Err(DispatchError::Timeout { timeout_secs }) => format!(
            "{sequence} exceeded its {timeout_secs}s deadline after {} steps",
            tracker.attempted()
        ),
        Err(_) => format!(
            "{sequence} finished with failures: {}/{} steps succeeded, first failure at {}",
            tracker.succeeded(),
            tracker.attempted(),
            tracker
                .first_failure()
                .map_or_else(|| "unknown step".to_string(), ToString::to_string)
        ),
    };
    if !tracker.warnings().is_empty() {
        summary.push_str(&format!(" (warnings: {})", tracker.warnings().join("; ")));
    }
    summary
}

fn outcome_label(outcome: &ExecutorResult<()>) -> &'static str {
    match outcome {
        Ok(()) => "success",
        Err(DispatchError::StepFailed { .. }) => "step_failed",
        Err(DispatchError::Timeout { .. }) => "timeout",
        Err(DispatchError::UnsupportedType(_)) => "unsupported",
        Err(DispatchError::NotInitialized) => "not_initialized",
    }
}
