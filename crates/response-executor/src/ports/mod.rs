//! Ports for the Response Executor
//!
//! Inbound: the API callers drive. Outbound: the facility subsystem
//! controllers the sequences drive.

pub mod inbound;
pub mod outbound;

pub use inbound::ResponseExecutorApi;
pub use outbound::{
    AccessController, BackupController, ContainmentController, EvacuationController,
    HardwareProbe, NetworkController, RecoveryController, ServiceController, SubsystemControllers,
    SurveillanceController,
};
