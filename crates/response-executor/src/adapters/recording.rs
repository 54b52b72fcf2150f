//! Recording controllers
//!
//! Logs every controller call in order, fails calls matching a scripted
//! rule, and tracks how many calls were in flight at once.

use crate::domain::ZoneMask;
use crate::error::{ControllerError, ControllerResult};
use crate::ports::outbound::{
    AccessController, BackupController, ContainmentController, EvacuationController,
    HardwareProbe, NetworkController, RecoveryController, ServiceController,
    SurveillanceController,
};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// One observed controller call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerCall {
    AccessInit,
    LockPhysicalAccess { zones: ZoneMask, duration_secs: u32 },
    UnlockEvacuationRoutes { zones: ZoneMask },
    RestoreNormalAccess,
    NetworkInit,
    IsolateSegments { zones: ZoneMask, severity: u8 },
    PrepareRuleSet,
    IsolateZone { zone: u8 },
    ActivateRuleSet,
    CleanupRules,
    StopNonCritical { zones: ZoneMask },
    StopService { name: String },
    StartBackup { name: String },
    StopEmergencyServices,
    EnhanceSurveillance { zones: ZoneMask },
    ActivateLighting { zones: ZoneMask },
    PowerDownNonEssential { zones: ZoneMask },
    EnableEmergencyComms,
    ActivateBackup { severity: u8 },
    Contain { zones: ZoneMask, severity: u8 },
    Recover { zones: ZoneMask },
}

impl ControllerCall {
    /// Lifecycle calls made by `init` and `cleanup` rather than a sequence
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            ControllerCall::AccessInit
                | ControllerCall::NetworkInit
                | ControllerCall::RestoreNormalAccess
                | ControllerCall::CleanupRules
                | ControllerCall::StopEmergencyServices
        )
    }
}

type FailureRule = Box<dyn Fn(&ControllerCall) -> bool + Send + Sync>;

/// Scriptable controller double
pub struct RecordingControllers {
    calls: Mutex<Vec<ControllerCall>>,
    failure_rule: RwLock<Option<FailureRule>>,
    call_delay: RwLock<Duration>,
    hardware_ready: AtomicBool,
    probes: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingControllers {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure_rule: RwLock::new(None),
            call_delay: RwLock::new(Duration::ZERO),
            hardware_ready: AtomicBool::new(true),
            probes: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Fail every call for which `rule` returns true
    pub fn fail_when<F>(&self, rule: F)
    where
        F: Fn(&ControllerCall) -> bool + Send + Sync + 'static,
    {
        *self.failure_rule.write() = Some(Box::new(rule));
    }

    pub fn clear_failures(&self) {
        *self.failure_rule.write() = None;
    }

    /// Make every call take `delay` before answering
    pub fn set_call_delay(&self, delay: Duration) {
        *self.call_delay.write() = delay;
    }

    pub fn set_hardware_ready(&self, ready: bool) {
        self.hardware_ready.store(ready, Ordering::SeqCst);
    }

    /// All calls so far, in order
    pub fn calls(&self) -> Vec<ControllerCall> {
        self.calls.lock().clone()
    }

    /// Calls made by response sequences, without lifecycle calls
    pub fn sequence_calls(&self) -> Vec<ControllerCall> {
        self.calls
            .lock()
            .iter()
            .filter(|call| !call.is_lifecycle())
            .cloned()
            .collect()
    }

    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&ControllerCall) -> bool,
    {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Number of hardware readiness probes answered
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed in flight at once
    pub fn max_concurrency(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn invoke(&self, call: ControllerCall) -> ControllerResult<()> {
        let _guard = InFlight::enter(&self.in_flight, &self.max_in_flight);

        let delay = *self.call_delay.read();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let fail = self
            .failure_rule
            .read()
            .as_ref()
            .is_some_and(|rule| rule(&call));
        let outcome = if fail {
            Err(ControllerError::OperationFailed(format!(
                "scripted failure: {call:?}"
            )))
        } else {
            Ok(())
        };
        self.calls.lock().push(call);
        outcome
    }
}

impl Default for RecordingControllers {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts a call as in flight until dropped
struct InFlight<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize, high_water: &AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        high_water.fetch_max(now, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccessController for RecordingControllers {
    async fn init(&self) -> ControllerResult<()> {
        self.invoke(ControllerCall::AccessInit).await
    }

    async fn lock_physical_access(
        &self,
        zones: ZoneMask,
        duration_secs: u32,
    ) -> ControllerResult<()> {
        self.invoke(ControllerCall::LockPhysicalAccess {
            zones,
            duration_secs,
        })
        .await
    }

    async fn unlock_evacuation_routes(&self, zones: ZoneMask) -> ControllerResult<()> {
        self.invoke(ControllerCall::UnlockEvacuationRoutes { zones })
            .await
    }

    async fn restore_normal_access(&self) -> ControllerResult<()> {
        self.invoke(ControllerCall::RestoreNormalAccess).await
    }
}

#[async_trait]
impl NetworkController for RecordingControllers {
    async fn init(&self) -> ControllerResult<()> {
        self.invoke(ControllerCall::NetworkInit).await
    }

    async fn isolate_segments(&self, zones: ZoneMask, severity: u8) -> ControllerResult<()> {
        self.invoke(ControllerCall::IsolateSegments { zones, severity })
            .await
    }

    async fn prepare_rule_set(&self) -> ControllerResult<()> {
        self.invoke(ControllerCall::PrepareRuleSet).await
    }

    async fn isolate_zone(&self, zone: u8) -> ControllerResult<()> {
        self.invoke(ControllerCall::IsolateZone { zone }).await
    }

    async fn activate_rule_set(&self) -> ControllerResult<()> {
        self.invoke(ControllerCall::ActivateRuleSet).await
    }

    async fn cleanup_rules(&self) -> ControllerResult<()> {
        self.invoke(ControllerCall::CleanupRules).await
    }
}

#[async_trait]
impl ServiceController for RecordingControllers {
    async fn stop_non_critical(&self, zones: ZoneMask) -> ControllerResult<()> {
        self.invoke(ControllerCall::StopNonCritical { zones }).await
    }

    async fn stop_service(&self, name: &str) -> ControllerResult<()> {
        self.invoke(ControllerCall::StopService {
            name: name.to_string(),
        })
        .await
    }

    async fn start_backup(&self, name: &str) -> ControllerResult<()> {
        self.invoke(ControllerCall::StartBackup {
            name: name.to_string(),
        })
        .await
    }

    async fn stop_emergency_services(&self) -> ControllerResult<()> {
        self.invoke(ControllerCall::StopEmergencyServices).await
    }
}

#[async_trait]
impl SurveillanceController for RecordingControllers {
    async fn enhance(&self, zones: ZoneMask) -> ControllerResult<()> {
        self.invoke(ControllerCall::EnhanceSurveillance { zones })
            .await
    }
}

#[async_trait]
impl EvacuationController for RecordingControllers {
    async fn activate_lighting(&self, zones: ZoneMask) {
        let _ = self.invoke(ControllerCall::ActivateLighting { zones }).await;
    }

    async fn power_down_non_essential(&self, zones: ZoneMask) {
        let _ = self
            .invoke(ControllerCall::PowerDownNonEssential { zones })
            .await;
    }

    async fn enable_emergency_comms(&self) {
        let _ = self.invoke(ControllerCall::EnableEmergencyComms).await;
    }
}

#[async_trait]
impl BackupController for RecordingControllers {
    async fn activate(&self, severity: u8) -> ControllerResult<()> {
        self.invoke(ControllerCall::ActivateBackup { severity })
            .await
    }
}

#[async_trait]
impl ContainmentController for RecordingControllers {
    async fn contain(&self, zones: ZoneMask, severity: u8) -> ControllerResult<()> {
        self.invoke(ControllerCall::Contain { zones, severity })
            .await
    }
}

#[async_trait]
impl RecoveryController for RecordingControllers {
    async fn recover(&self, zones: ZoneMask) -> ControllerResult<()> {
        self.invoke(ControllerCall::Recover { zones }).await
    }
}

#[async_trait]
impl HardwareProbe for RecordingControllers {
    async fn check_ready(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.hardware_ready.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_failures() {
        let c = RecordingControllers::new();
        c.fail_when(|call| matches!(call, ControllerCall::IsolateZone { zone: 2 }));

        assert!(c.isolate_zone(1).await.is_ok());
        assert!(c.isolate_zone(2).await.is_err());
        assert_eq!(c.calls().len(), 2);

        c.clear_failures();
        assert!(c.isolate_zone(2).await.is_ok());
    }

    #[tokio::test]
    async fn test_lifecycle_calls_filtered() {
        let c = RecordingControllers::new();
        AccessController::init(&c).await.unwrap();
        c.enhance(ZoneMask::ALL).await.unwrap();
        c.cleanup_rules().await.unwrap();
        assert_eq!(
            c.sequence_calls(),
            vec![ControllerCall::EnhanceSurveillance {
                zones: ZoneMask::ALL
            }]
        );
    }

    #[tokio::test]
    async fn test_probe_counts_and_readiness() {
        let c = RecordingControllers::new();
        assert!(c.check_ready().await);
        c.set_hardware_ready(false);
        assert!(!c.check_ready().await);
        assert_eq!(c.probe_count(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_tracks_concurrent_calls() {
        let c = std::sync::Arc::new(RecordingControllers::new());
        c.set_call_delay(Duration::from_millis(50));

        let a = tokio::spawn({
            let c = c.clone();
            async move { c.isolate_zone(1).await }
        });
        let b = tokio::spawn({
            let c = c.clone();
            async move { c.isolate_zone(2).await }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(c.max_concurrency(), 2);
    }
}
