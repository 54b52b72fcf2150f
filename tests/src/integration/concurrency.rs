//! # Dispatch Serialization
//!
//! Concurrent callers on a multi-threaded runtime must see sequences run one
//! at a time, with each report published whole.

#[cfg(test)]
mod tests {
    use super::super::ready_executor;
    use parking_lot::Mutex;
    use response_executor::adapters::ControllerCall;
    use response_executor::{
        ExecutionReport, ExecutorConfig, ResponseExecutorApi, ResponseRequest, ResponseType,
        ZoneMask,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const CALLERS: u8 = 8;

    /// Zone mask carried by a lockdown call
    fn zones_of(call: &ControllerCall) -> Option<ZoneMask> {
        match call {
            ControllerCall::LockPhysicalAccess { zones, .. }
            | ControllerCall::IsolateSegments { zones, .. }
            | ControllerCall::StopNonCritical { zones }
            | ControllerCall::EnhanceSurveillance { zones } => Some(*zones),
            _ => None,
        }
    }

    fn report_is_whole(report: &ExecutionReport) -> bool {
        report.sub_operations == report.success_count + report.failed_count
            && (report.response_id == 0 || report.sub_operations == 4)
    }

    // =============================================================================
    // SERIALIZATION
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_dispatches_never_overlap() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        controllers.set_call_delay(Duration::from_millis(2));

        let handles: Vec<_> = (0..CALLERS)
            .map(|i| {
                let executor = executor.clone();
                tokio::spawn(async move {
                    let request = ResponseRequest::new(
                        ResponseType::Lockdown,
                        5,
                        ZoneMask::from_zones(&[i]),
                        "concurrent drill",
                    )
                    .with_timestamp(100 + u64::from(i));
                    executor.dispatch(request).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(controllers.max_concurrency(), 1);

        let calls = controllers.sequence_calls();
        assert_eq!(calls.len(), usize::from(CALLERS) * 4);
        for block in calls.chunks(4) {
            let first = zones_of(&block[0]).unwrap();
            assert!(
                block.iter().all(|call| zones_of(call) == Some(first)),
                "interleaved sequence calls: {block:?}"
            );
        }

        let last = executor.last_report().response_id;
        assert!((100..100 + u64::from(CALLERS)).contains(&last));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_a_torn_report() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        controllers.set_call_delay(Duration::from_millis(1));

        let done = Arc::new(AtomicBool::new(false));
        let torn = Arc::new(Mutex::new(Vec::new()));

        let reader = tokio::spawn({
            let executor = executor.clone();
            let done = done.clone();
            let torn = torn.clone();
            async move {
                while !done.load(Ordering::SeqCst) {
                    let report = executor.last_report();
                    if !report_is_whole(&report) {
                        torn.lock().push(report);
                    }
                    tokio::task::yield_now().await;
                }
            }
        });

        let writers: Vec<_> = (0..CALLERS)
            .map(|i| {
                let executor = executor.clone();
                tokio::spawn(async move {
                    let request = ResponseRequest::new(
                        ResponseType::Lockdown,
                        3,
                        ZoneMask::ALL,
                        "reader drill",
                    )
                    .with_timestamp(500 + u64::from(i));
                    executor.dispatch(request).await
                })
            })
            .collect();

        for writer in writers {
            writer.await.unwrap().unwrap();
        }
        done.store(true, Ordering::SeqCst);
        reader.await.unwrap();

        assert!(torn.lock().is_empty(), "torn reports: {:?}", torn.lock());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cleanup_waits_for_running_dispatch() {
        let (executor, controllers) = ready_executor(ExecutorConfig::for_testing()).await;
        controllers.set_call_delay(Duration::from_millis(20));

        let running = tokio::spawn({
            let executor = executor.clone();
            async move {
                let request =
                    ResponseRequest::new(ResponseType::Lockdown, 5, ZoneMask::ALL, "long drill")
                        .with_timestamp(900);
                executor.dispatch(request).await
            }
        });

        while controllers.calls().is_empty() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        executor.cleanup().await;

        running.await.unwrap().unwrap();
        let calls = controllers.calls();
        let restore = calls
            .iter()
            .position(|c| *c == ControllerCall::RestoreNormalAccess)
            .unwrap();
        let surveillance = calls
            .iter()
            .position(|c| matches!(c, ControllerCall::EnhanceSurveillance { .. }))
            .unwrap();
        assert!(surveillance < restore);
        assert_eq!(executor.last_report().response_id, 900);
    }
}
