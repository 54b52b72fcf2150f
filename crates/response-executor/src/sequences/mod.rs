//! Response sequence handlers
//!
//! One handler per handled response type. Handlers attempt every step once,
//! record outcomes in the tracker, and never abort early.

mod evacuation;
mod lockdown;
mod network_isolation;
mod service_failover;
mod single_step;

pub use evacuation::EvacuationSequence;
pub use lockdown::LockdownSequence;
pub use network_isolation::NetworkIsolationSequence;
pub use service_failover::{ServiceFailoverSequence, CRITICAL_SERVICES};
pub use single_step::{BackupActivationSequence, PartialContainmentSequence, RecoverySequence};

use crate::domain::{ResponseRequest, ResponseType, SequenceTracker};
use crate::ports::SubsystemControllers;
use async_trait::async_trait;
use std::time::Duration;

/// What a sequence may touch while it runs
#[derive(Debug)]
pub struct SequenceContext<'a> {
    pub controllers: &'a SubsystemControllers,
    /// Pause between services during failover
    pub failover_delay: Duration,
}

#[async_trait]
pub trait ResponseSequence: Send + Sync {
    /// Short human description used in report summaries
    fn summary(&self) -> &'static str;

    async fn execute(
        &self,
        request: &ResponseRequest,
        ctx: &SequenceContext<'_>,
        tracker: &mut SequenceTracker,
    );
}

/// Handler for a response type, `None` for types without one
pub fn sequence_for(response_type: ResponseType) -> Option<&'static dyn ResponseSequence> {
    match response_type {
        ResponseType::Lockdown => Some(&LockdownSequence),
        ResponseType::NetworkIsolate => Some(&NetworkIsolationSequence),
        ResponseType::ServiceFailover => Some(&ServiceFailoverSequence),
        ResponseType::Evacuation => Some(&EvacuationSequence),
        ResponseType::BackupActivate => Some(&BackupActivationSequence),
        ResponseType::PartialContain => Some(&PartialContainmentSequence),
        ResponseType::FullRecovery => Some(&RecoverySequence),
        ResponseType::CommsPriority => None,
    }
}
