//! Zone-by-zone network isolation

use super::{ResponseSequence, SequenceContext};
use crate::domain::{ResponseRequest, SequenceStep, SequenceTracker};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Prepare the rule set, add one rule per target zone, then activate.
///
/// Activation runs even when zone rules failed.
pub struct NetworkIsolationSequence;

#[async_trait]
impl ResponseSequence for NetworkIsolationSequence {
    fn summary(&self) -> &'static str {
        "network isolation"
    }

    async fn execute(
        &self,
        request: &ResponseRequest,
        ctx: &SequenceContext<'_>,
        tracker: &mut SequenceTracker,
    ) {
        let network = &ctx.controllers.network;

        // Best-effort: the rule set may already exist
        if let Err(e) = network.prepare_rule_set().await {
            warn!(error = %e, "Rule set preparation failed, continuing");
        }

        for zone in request.target_zones {
            debug!(zone, "Isolating zone");
            tracker.record(
                SequenceStep::ZoneIsolation { zone },
                network.isolate_zone(zone).await,
            );
        }

        tracker.record(
            SequenceStep::RuleSetActivation,
            network.activate_rule_set().await,
        );
    }
}
