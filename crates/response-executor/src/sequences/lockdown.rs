//! Full facility lockdown

use super::{ResponseSequence, SequenceContext};
use crate::domain::{ResponseRequest, SequenceStep, SequenceTracker};
use async_trait::async_trait;
use tracing::info;

/// Access lock, network isolation, non-critical service stop, then
/// surveillance enhancement
pub struct LockdownSequence;

#[async_trait]
impl ResponseSequence for LockdownSequence {
    fn summary(&self) -> &'static str {
        "facility lockdown"
    }

    async fn execute(
        &self,
        request: &ResponseRequest,
        ctx: &SequenceContext<'_>,
        tracker: &mut SequenceTracker,
    ) {
        let zones = request.target_zones;
        let c = ctx.controllers;

        info!(zones = %zones, severity = request.severity, "Executing lockdown");

        tracker.record(
            SequenceStep::AccessLock,
            c.access
                .lock_physical_access(zones, request.duration_secs)
                .await,
        );
        tracker.record(
            SequenceStep::NetworkIsolation,
            c.network.isolate_segments(zones, request.severity).await,
        );
        tracker.record(
            SequenceStep::NonCriticalServiceStop,
            c.service.stop_non_critical(zones).await,
        );
        tracker.record(
            SequenceStep::SurveillanceEnhancement,
            c.surveillance.enhance(zones).await,
        );
    }
}
