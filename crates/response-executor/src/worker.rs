//! Emergency dispatch worker
//!
//! A single task drains a bounded channel of emergency requests and runs
//! each through the ordinary lock-protected dispatch path. Requests are
//! moved into the channel; the worker owns them from then on.

use crate::domain::ResponseRequest;
use crate::service::ExecutorInner;
use std::sync::Weak;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, info, warn};

pub(crate) struct EmergencyQueue {
    sender: mpsc::Sender<ResponseRequest>,
    runtime: Handle,
}

impl EmergencyQueue {
    /// Spawn the worker on `runtime`
    pub fn start(runtime: Handle, executor: Weak<ExecutorInner>, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        runtime.spawn(run_worker(receiver, executor));
        Self { sender, runtime }
    }

    /// Hand a request to the worker without waiting.
    ///
    /// When the channel is full the send moves to a detached task. Returns
    /// false only if the worker has stopped.
    pub fn schedule(&self, request: ResponseRequest) -> bool {
        match self.sender.try_send(request) {
            Ok(()) => true,
            Err(TrySendError::Full(request)) => {
                warn!(
                    response_id = request.response_id(),
                    "Emergency queue full, deferring send"
                );
                let sender = self.sender.clone();
                self.runtime.spawn(async move {
                    if sender.send(request).await.is_err() {
                        warn!("Emergency worker stopped before deferred request was queued");
                    }
                });
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<ResponseRequest>,
    executor: Weak<ExecutorInner>,
) {
    debug!("Emergency dispatch worker started");

    while let Some(request) = receiver.recv().await {
        let Some(executor) = executor.upgrade() else {
            break;
        };
        let response_id = request.response_id();
        match executor.dispatch(request).await {
            Ok(()) => info!(response_id, "Emergency lockdown completed"),
            Err(e) => error!(response_id, error = %e, code = e.code(), "Emergency lockdown failed"),
        }
    }

    debug!("Emergency dispatch worker stopped");
}
