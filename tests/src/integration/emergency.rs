//! # Panic Button
//!
//! The trigger only flips state and enqueues; the lockdown itself runs on the
//! emergency worker once the dispatch lock is free.

#[cfg(test)]
mod tests {
    use super::super::{ready_executor, wait_for_report};
    use response_executor::adapters::{ControllerCall, RecordingControllers};
    use response_executor::{
        ExecutorConfig, ResponseExecutor, ResponseExecutorApi, ResponseRequest, ResponseType,
        SubsystemControllers, SystemConfig, SystemMode, ZoneMask,
        EMERGENCY_LOCKDOWN_DURATION_SECS,
    };
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    // =============================================================================
    // LATENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_trigger_returns_while_dispatch_holds_lock() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        controllers.set_call_delay(Duration::from_millis(50));

        let failover = tokio::spawn({
            let executor = executor.clone();
            async move {
                let request = ResponseRequest::new(
                    ResponseType::ServiceFailover,
                    4,
                    ZoneMask::NONE,
                    "planned failover",
                )
                .with_timestamp(1);
                executor.dispatch(request).await
            }
        });
        while controllers.calls().is_empty() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        let started = Instant::now();
        let response_id = executor.trigger_emergency(7).unwrap();
        assert!(started.elapsed() < Duration::from_millis(10));

        assert!(executor.emergency_mode());
        assert_eq!(executor.current_level(), 7);
        assert_eq!(executor.system_status(), SystemMode::Emergency);

        failover.await.unwrap().unwrap();
        let report = wait_for_report(&executor, response_id).await;
        assert!(report.is_success());
        assert_eq!(report.sub_operations, 4);
        assert_eq!(report.system_mode, SystemMode::Lockdown);

        // The lockdown ran after the failover finished
        let calls = controllers.sequence_calls();
        let last_failover = calls
            .iter()
            .rposition(|c| matches!(c, ControllerCall::StartBackup { .. }))
            .unwrap();
        let lock = calls
            .iter()
            .position(|c| {
                *c == ControllerCall::LockPhysicalAccess {
                    zones: ZoneMask::ALL,
                    duration_secs: EMERGENCY_LOCKDOWN_DURATION_SECS,
                }
            })
            .unwrap();
        assert!(last_failover < lock);
    }

    // =============================================================================
    // STATE
    // =============================================================================

    #[tokio::test]
    async fn test_level_is_clamped() {
        let (executor, _controllers) = ready_executor(ExecutorConfig::for_testing()).await;

        executor.trigger_emergency(0).unwrap();
        assert_eq!(executor.current_level(), 1);

        executor.trigger_emergency(250).unwrap();
        assert_eq!(executor.current_level(), 10);
    }

    #[tokio::test]
    async fn test_disabled_override_changes_nothing() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        executor
            .update_config(SystemConfig {
                enable_emergency_override: false,
                ..SystemConfig::default()
            })
            .unwrap();

        assert_eq!(executor.trigger_emergency(10), None);
        assert!(!executor.emergency_mode());
        assert_eq!(executor.current_level(), 0);
        assert_eq!(executor.system_status(), SystemMode::Normal);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(controllers.calls().is_empty());
    }

    #[tokio::test]
    async fn test_trigger_before_init_flags_emergency_only() {
        let controllers = Arc::new(RecordingControllers::new());
        let executor = ResponseExecutor::new(
            ExecutorConfig::for_testing(),
            SubsystemControllers::from_shared(controllers.clone()),
        );

        assert_eq!(executor.trigger_emergency(5), None);
        assert!(executor.emergency_mode());
        assert_eq!(executor.current_level(), 5);
        assert!(!executor.is_ready().await);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(controllers.calls().is_empty());

        // A fresh init starts from a clear state
        executor.init().await.unwrap();
        assert!(!executor.emergency_mode());
        assert_eq!(executor.current_level(), 0);
    }

    #[tokio::test]
    async fn test_recovery_clears_emergency() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;

        let response_id = executor.trigger_emergency(9).unwrap();
        wait_for_report(&executor, response_id).await;
        assert!(!executor.is_ready().await);

        let recovery =
            ResponseRequest::new(ResponseType::FullRecovery, 3, ZoneMask::ALL, "all clear")
                .with_timestamp(response_id + 1);
        executor.dispatch(recovery).await.unwrap();

        assert!(!executor.emergency_mode());
        assert_eq!(executor.current_level(), 0);
        assert_eq!(executor.emergency_since(), None);
        assert_eq!(executor.system_status(), SystemMode::Recovery);
        assert!(executor.is_ready().await);
        assert_eq!(
            controllers.count(|c| matches!(c, ControllerCall::Recover { .. })),
            1
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_burst_beyond_queue_capacity_runs_every_lockdown() {
        let config = ExecutorConfig {
            emergency_queue_capacity: 1,
            ..ExecutorConfig::for_testing()
        };
        let (executor, controllers) = ready_executor(config).await;
        controllers.set_call_delay(Duration::from_millis(5));

        let ids: Vec<u64> = (1..=5)
            .map(|level| executor.trigger_emergency(level).unwrap())
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]), "{ids:?}");

        let locks = |c: &ControllerCall| matches!(c, ControllerCall::LockPhysicalAccess { .. });
        tokio::time::timeout(Duration::from_secs(5), async {
            while controllers.count(locks) < 5 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        assert_eq!(controllers.max_concurrency(), 1);
        assert_eq!(executor.system_status(), SystemMode::Lockdown);
        let last = *ids.iter().max().unwrap();
        assert_eq!(wait_for_report(&executor, last).await.response_id, last);
    }
}
