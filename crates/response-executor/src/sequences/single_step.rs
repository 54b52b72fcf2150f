//! Sequences that make a single controller call

use super::{ResponseSequence, SequenceContext};
use crate::domain::{ResponseRequest, SequenceStep, SequenceTracker};
use async_trait::async_trait;

pub struct BackupActivationSequence;

#[async_trait]
impl ResponseSequence for BackupActivationSequence {
    fn summary(&self) -> &'static str {
        "backup system activation"
    }

    async fn execute(
        &self,
        request: &ResponseRequest,
        ctx: &SequenceContext<'_>,
        tracker: &mut SequenceTracker,
    ) {
        tracker.record(
            SequenceStep::BackupActivation,
            ctx.controllers.backup.activate(request.severity).await,
        );
    }
}

pub struct PartialContainmentSequence;

#[async_trait]
impl ResponseSequence for PartialContainmentSequence {
    fn summary(&self) -> &'static str {
        "partial containment"
    }

    async fn execute(
        &self,
        request: &ResponseRequest,
        ctx: &SequenceContext<'_>,
        tracker: &mut SequenceTracker,
    ) {
        tracker.record(
            SequenceStep::PartialContainment,
            ctx.controllers
                .containment
                .contain(request.target_zones, request.severity)
                .await,
        );
    }
}

pub struct RecoverySequence;

#[async_trait]
impl ResponseSequence for RecoverySequence {
    fn summary(&self) -> &'static str {
        "full system recovery"
    }

    async fn execute(
        &self,
        request: &ResponseRequest,
        ctx: &SequenceContext<'_>,
        tracker: &mut SequenceTracker,
    ) {
        tracker.record(
            SequenceStep::RecoverySequence,
            ctx.controllers.recovery.recover(request.target_zones).await,
        );
    }
}
