//! # Integration Tests
//!
//! Drive a fully initialized executor against scripted controllers.
//!
//! - `dispatch_flows` - every response type through init, dispatch and cleanup
//! - `concurrency` - dispatch serialization under a multi-threaded runtime
//! - `emergency` - panic-button latency and the scheduled lockdown

pub mod concurrency;
pub mod dispatch_flows;
pub mod emergency;

use response_executor::adapters::RecordingControllers;
use response_executor::{
    ExecutionReport, ExecutorConfig, ResponseExecutor, ResponseExecutorApi, SubsystemControllers,
};
use std::sync::Arc;
use std::time::Duration;

/// Initialized executor wired to recording controllers, with init calls cleared
pub async fn ready_executor(
    config: ExecutorConfig,
) -> (ResponseExecutor, Arc<RecordingControllers>) {
    let controllers = Arc::new(RecordingControllers::new());
    let executor = ResponseExecutor::new(
        config,
        SubsystemControllers::from_shared(controllers.clone()),
    );
    if let Err(e) = executor.init().await {
        panic!("executor failed to initialize: {e}");
    }
    controllers.clear_calls();
    (executor, controllers)
}

/// Poll until the report for `response_id` is published
pub async fn wait_for_report(executor: &ResponseExecutor, response_id: u64) -> ExecutionReport {
    let waited = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let report = executor.last_report();
            if report.response_id == response_id {
                return report;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await;
    match waited {
        Ok(report) => report,
        Err(_) => panic!("report {response_id} never published"),
    }
}
