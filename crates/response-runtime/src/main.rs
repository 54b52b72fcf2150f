//! # Facility Response Orchestrator
//!
//! Process entry point.
//!
//! ## Signals
//!
//! - `SIGUSR1`: panic button, schedules a maximal lockdown
//! - `Ctrl+C`: graceful shutdown

use anyhow::{Context, Result};
use response_runtime::{load_config, ResponseRuntime, RuntimeContainer};
use response_telemetry::{init_telemetry, TelemetryConfig};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry_config = TelemetryConfig::from_env();
    let telemetry =
        init_telemetry(telemetry_config.clone()).context("Failed to initialize telemetry")?;
    match serde_json::to_string(&telemetry_config) {
        Ok(json) => info!(
            service = telemetry.service_name(),
            json_logs = telemetry.json_logs(),
            config = %json,
            "Telemetry configuration"
        ),
        Err(e) => tracing::warn!(error = %e, "Could not render telemetry configuration"),
    }

    let config = load_config().context("Invalid runtime configuration")?;

    let runtime = Arc::new(ResponseRuntime::new(
        RuntimeContainer::with_logging_controllers(config),
    ));
    runtime.start().await?;

    let panic_listener = tokio::spawn(listen_for_panic_button(
        Arc::clone(&runtime),
        runtime.shutdown_signal(),
    ));

    info!("Orchestrator is running. Send SIGUSR1 for the panic button, Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    let report = runtime.shutdown().await;
    panic_listener.abort();
    info!(
        response_id = report.response_id,
        overall_result = report.overall_result,
        "Exited"
    );

    Ok(())
}

#[cfg(unix)]
async fn listen_for_panic_button(runtime: Arc<ResponseRuntime>, mut shutdown: watch::Receiver<bool>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigusr1 = match signal(SignalKind::user_defined1()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(error = %e, "Could not install SIGUSR1 handler, panic button disabled");
            return;
        }
    };

    loop {
        tokio::select! {
            received = sigusr1.recv() => {
                if received.is_none() {
                    break;
                }
                runtime.panic_button();
            }
            _ = shutdown.changed() => {
                info!("Panic button listener stopped");
                break;
            }
        }
    }
}

#[cfg(not(unix))]
async fn listen_for_panic_button(_runtime: Arc<ResponseRuntime>, mut shutdown: watch::Receiver<bool>) {
    tracing::warn!("Panic button signal is only available on Unix");
    let _ = shutdown.changed().await;
}
