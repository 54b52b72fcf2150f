//! Emergency evacuation

use super::{ResponseSequence, SequenceContext};
use crate::domain::{ResponseRequest, SequenceStep, SequenceTracker};
use async_trait::async_trait;
use tracing::info;

/// Unlock routes, then lighting, power-down and comms regardless of the
/// unlock outcome
pub struct EvacuationSequence;

#[async_trait]
impl ResponseSequence for EvacuationSequence {
    fn summary(&self) -> &'static str {
        "emergency evacuation"
    }

    async fn execute(
        &self,
        request: &ResponseRequest,
        ctx: &SequenceContext<'_>,
        tracker: &mut SequenceTracker,
    ) {
        let zones = request.target_zones;
        let c = ctx.controllers;

        info!(zones = %zones, "Executing evacuation");

        tracker.record(
            SequenceStep::EvacuationRouteUnlock,
            c.access.unlock_evacuation_routes(zones).await,
        );

        c.evacuation.activate_lighting(zones).await;
        tracker.record_best_effort(SequenceStep::EvacuationLighting);

        c.evacuation.power_down_non_essential(zones).await;
        tracker.record_best_effort(SequenceStep::NonEssentialPowerDown);

        c.evacuation.enable_emergency_comms().await;
        tracker.record_best_effort(SequenceStep::EmergencyComms);
    }
}
