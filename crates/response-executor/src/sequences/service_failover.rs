//! Critical service failover

use super::{ResponseSequence, SequenceContext};
use crate::domain::{ResponseRequest, SequenceStep, SequenceTracker};
use async_trait::async_trait;
use tracing::info;

/// Services moved to their backups, in failover order
pub const CRITICAL_SERVICES: [&str; 4] = [
    "facility-core",
    "auth-service",
    "network-monitor",
    "database-service",
];

/// Stop each primary and start its backup.
///
/// No rollback: a service whose backup failed after its primary stopped
/// stays down and is reported as a warning.
pub struct ServiceFailoverSequence;

#[async_trait]
impl ResponseSequence for ServiceFailoverSequence {
    fn summary(&self) -> &'static str {
        "critical service failover"
    }

    async fn execute(
        &self,
        _request: &ResponseRequest,
        ctx: &SequenceContext<'_>,
        tracker: &mut SequenceTracker,
    ) {
        let services = &ctx.controllers.service;

        for (i, name) in CRITICAL_SERVICES.iter().enumerate() {
            if i > 0 && !ctx.failover_delay.is_zero() {
                tokio::time::sleep(ctx.failover_delay).await;
            }

            info!(service = *name, "Failing over service");

            let stopped = tracker.record(
                SequenceStep::PrimaryStop {
                    service: (*name).to_string(),
                },
                services.stop_service(name).await,
            );
            let started = tracker.record(
                SequenceStep::BackupStart {
                    service: (*name).to_string(),
                },
                services.start_backup(name).await,
            );

            match (stopped, started) {
                (true, false) => tracker.warn(format!("{name} left without primary or backup")),
                (false, true) => tracker.warn(format!("{name} primary and backup both running")),
                _ => {}
            }
        }
    }
}
