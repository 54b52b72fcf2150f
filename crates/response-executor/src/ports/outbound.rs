//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Each facility subsystem sits behind its own capability trait. Operations
//! are idempotent and individually failable; the dispatch lock guarantees at
//! most one sequence drives them at a time.

use crate::domain::ZoneMask;
use crate::error::ControllerResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Physical access control (doors, turnstiles, route locks)
#[async_trait]
pub trait AccessController: Send + Sync {
    /// Bring the access control backend online
    async fn init(&self) -> ControllerResult<()>;

    async fn lock_physical_access(&self, zones: ZoneMask, duration_secs: u32)
        -> ControllerResult<()>;

    async fn unlock_evacuation_routes(&self, zones: ZoneMask) -> ControllerResult<()>;

    /// Return every door to its default state
    async fn restore_normal_access(&self) -> ControllerResult<()>;
}

/// Network segmentation
///
/// Zone fan-out uses a rule-set lifecycle: prepare, one rule per zone, then
/// a single activation that commits the set.
#[async_trait]
pub trait NetworkController: Send + Sync {
    async fn init(&self) -> ControllerResult<()>;

    /// Isolate all segments of the given zones in one call
    async fn isolate_segments(&self, zones: ZoneMask, severity: u8) -> ControllerResult<()>;

    async fn prepare_rule_set(&self) -> ControllerResult<()>;

    async fn isolate_zone(&self, zone: u8) -> ControllerResult<()>;

    async fn activate_rule_set(&self) -> ControllerResult<()>;

    /// Drop every isolation rule
    async fn cleanup_rules(&self) -> ControllerResult<()>;
}

/// Service lifecycle management
#[async_trait]
pub trait ServiceController: Send + Sync {
    async fn stop_non_critical(&self, zones: ZoneMask) -> ControllerResult<()>;

    async fn stop_service(&self, name: &str) -> ControllerResult<()>;

    async fn start_backup(&self, name: &str) -> ControllerResult<()>;

    /// Stop services that only run during an emergency
    async fn stop_emergency_services(&self) -> ControllerResult<()>;
}

#[async_trait]
pub trait SurveillanceController: Send + Sync {
    async fn enhance(&self, zones: ZoneMask) -> ControllerResult<()>;
}

/// Evacuation hardware. These operations have no failure path.
#[async_trait]
pub trait EvacuationController: Send + Sync {
    async fn activate_lighting(&self, zones: ZoneMask);

    async fn power_down_non_essential(&self, zones: ZoneMask);

    async fn enable_emergency_comms(&self);
}

#[async_trait]
pub trait BackupController: Send + Sync {
    async fn activate(&self, severity: u8) -> ControllerResult<()>;
}

#[async_trait]
pub trait ContainmentController: Send + Sync {
    async fn contain(&self, zones: ZoneMask, severity: u8) -> ControllerResult<()>;
}

#[async_trait]
pub trait RecoveryController: Send + Sync {
    async fn recover(&self, zones: ZoneMask) -> ControllerResult<()>;
}

/// Live hardware readiness check
#[async_trait]
pub trait HardwareProbe: Send + Sync {
    async fn check_ready(&self) -> bool;
}

/// The full set of controllers injected into an executor
#[derive(Clone)]
pub struct SubsystemControllers {
    pub access: Arc<dyn AccessController>,
    pub network: Arc<dyn NetworkController>,
    pub service: Arc<dyn ServiceController>,
    pub surveillance: Arc<dyn SurveillanceController>,
    pub evacuation: Arc<dyn EvacuationController>,
    pub backup: Arc<dyn BackupController>,
    pub containment: Arc<dyn ContainmentController>,
    pub recovery: Arc<dyn RecoveryController>,
    pub hardware: Arc<dyn HardwareProbe>,
}

impl SubsystemControllers {
    /// Use one object for every controller role
    pub fn from_shared<C>(controllers: Arc<C>) -> Self
    where
        C: AccessController
            + NetworkController
            + ServiceController
            + SurveillanceController
            + EvacuationController
            + BackupController
            + ContainmentController
            + RecoveryController
            + HardwareProbe
            + 'static,
    {
        Self {
            access: controllers.clone(),
            network: controllers.clone(),
            service: controllers.clone(),
            surveillance: controllers.clone(),
            evacuation: controllers.clone(),
            backup: controllers.clone(),
            containment: controllers.clone(),
            recovery: controllers.clone(),
            hardware: controllers,
        }
    }
}

impl std::fmt::Debug for SubsystemControllers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsystemControllers").finish_non_exhaustive()
    }
}
