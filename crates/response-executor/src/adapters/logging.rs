//! Log-only controllers
//!
//! Stand-ins for facility hardware: each operation emits a `tracing` event
//! and reports success.

use crate::domain::ZoneMask;
use crate::error::ControllerResult;
use crate::ports::outbound::{
    AccessController, BackupController, ContainmentController, EvacuationController,
    HardwareProbe, NetworkController, RecoveryController, ServiceController,
    SurveillanceController,
};
use async_trait::async_trait;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingControllers;

impl LoggingControllers {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccessController for LoggingControllers {
    async fn init(&self) -> ControllerResult<()> {
        info!("[access] Access control online");
        Ok(())
    }

    async fn lock_physical_access(
        &self,
        zones: ZoneMask,
        duration_secs: u32,
    ) -> ControllerResult<()> {
        info!(zones = %zones, duration_secs, "[access] Locking physical access");
        Ok(())
    }

    async fn unlock_evacuation_routes(&self, zones: ZoneMask) -> ControllerResult<()> {
        info!(zones = %zones, "[access] Unlocking evacuation routes");
        Ok(())
    }

    async fn restore_normal_access(&self) -> ControllerResult<()> {
        info!("[access] Restoring normal access");
        Ok(())
    }
}

#[async_trait]
impl NetworkController for LoggingControllers {
    async fn init(&self) -> ControllerResult<()> {
        info!("[network] Network isolation backend online");
        Ok(())
    }

    async fn isolate_segments(&self, zones: ZoneMask, severity: u8) -> ControllerResult<()> {
        info!(zones = %zones, severity, "[network] Isolating segments");
        Ok(())
    }

    async fn prepare_rule_set(&self) -> ControllerResult<()> {
        debug!("[network] Preparing isolation rule set");
        Ok(())
    }

    async fn isolate_zone(&self, zone: u8) -> ControllerResult<()> {
        debug!(zone, "[network] Adding zone isolation rule");
        Ok(())
    }

    async fn activate_rule_set(&self) -> ControllerResult<()> {
        info!("[network] Activating isolation rule set");
        Ok(())
    }

    async fn cleanup_rules(&self) -> ControllerResult<()> {
        info!("[network] Clearing isolation rules");
        Ok(())
    }
}

#[async_trait]
impl ServiceController for LoggingControllers {
    async fn stop_non_critical(&self, zones: ZoneMask) -> ControllerResult<()> {
        info!(zones = %zones, "[service] Stopping non-critical services");
        Ok(())
    }

    async fn stop_service(&self, name: &str) -> ControllerResult<()> {
        info!(service = name, "[service] Stopping primary");
        Ok(())
    }

    async fn start_backup(&self, name: &str) -> ControllerResult<()> {
        info!(service = name, "[service] Starting backup");
        Ok(())
    }

    async fn stop_emergency_services(&self) -> ControllerResult<()> {
        info!("[service] Stopping emergency-only services");
        Ok(())
    }
}

#[async_trait]
impl SurveillanceController for LoggingControllers {
    async fn enhance(&self, zones: ZoneMask) -> ControllerResult<()> {
        info!(zones = %zones, "[surveillance] Enhancing monitoring");
        Ok(())
    }
}

#[async_trait]
impl EvacuationController for LoggingControllers {
    async fn activate_lighting(&self, zones: ZoneMask) {
        info!(zones = %zones, "[evacuation] Activating emergency lighting");
    }

    async fn power_down_non_essential(&self, zones: ZoneMask) {
        info!(zones = %zones, "[evacuation] Powering down non-essential systems");
    }

    async fn enable_emergency_comms(&self) {
        info!("[evacuation] Emergency communications enabled");
    }
}

#[async_trait]
impl BackupController for LoggingControllers {
    async fn activate(&self, severity: u8) -> ControllerResult<()> {
        info!(severity, "[backup] Activating backup systems");
        Ok(())
    }
}

#[async_trait]
impl ContainmentController for LoggingControllers {
    async fn contain(&self, zones: ZoneMask, severity: u8) -> ControllerResult<()> {
        info!(zones = %zones, severity, "[containment] Applying partial containment");
        Ok(())
    }
}

#[async_trait]
impl RecoveryController for LoggingControllers {
    async fn recover(&self, zones: ZoneMask) -> ControllerResult<()> {
        info!(zones = %zones, "[recovery] Running recovery sequence");
        Ok(())
    }
}

#[async_trait]
impl HardwareProbe for LoggingControllers {
    async fn check_ready(&self) -> bool {
        true
    }
}
