//! Sequence steps and per-dispatch step tracking
//!
//! Sequences never abort on a failing step. The tracker counts every attempt
//! and keeps the first failure, whose position decides the overall result.

use crate::error::{ControllerError, ControllerResult};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// One controller call inside a response sequence
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceStep {
    // Lockdown
    AccessLock,
    NetworkIsolation,
    NonCriticalServiceStop,
    SurveillanceEnhancement,

    // Network isolation
    ZoneIsolation { zone: u8 },
    RuleSetActivation,

    // Service failover
    PrimaryStop { service: String },
    BackupStart { service: String },

    // Evacuation
    EvacuationRouteUnlock,
    EvacuationLighting,
    NonEssentialPowerDown,
    EmergencyComms,

    // Single-call sequences
    BackupActivation,
    PartialContainment,
    RecoverySequence,
}

impl SequenceStep {
    /// Result code reported when this step is the first to fail.
    ///
    /// The code is the step's position within its sequence, so zone and
    /// service instances of the same step share one code. The evacuation
    /// follow-up steps are only recorded through
    /// [`SequenceTracker::record_best_effort`] and never fail; they keep
    /// their positional code for reporting only.
    pub fn failure_code(&self) -> i32 {
        match self {
            SequenceStep::AccessLock
            | SequenceStep::ZoneIsolation { .. }
            | SequenceStep::PrimaryStop { .. }
            | SequenceStep::EvacuationRouteUnlock
            | SequenceStep::BackupActivation
            | SequenceStep::PartialContainment
            | SequenceStep::RecoverySequence => -1,
            SequenceStep::NetworkIsolation
            | SequenceStep::RuleSetActivation
            | SequenceStep::BackupStart { .. }
            | SequenceStep::EvacuationLighting => -2,
            SequenceStep::NonCriticalServiceStop | SequenceStep::NonEssentialPowerDown => -3,
            SequenceStep::SurveillanceEnhancement | SequenceStep::EmergencyComms => -4,
        }
    }

    /// Stable label, without zone or service parameters
    pub fn name(&self) -> &'static str {
        match self {
            SequenceStep::AccessLock => "access-lock",
            SequenceStep::NetworkIsolation => "network-isolation",
            SequenceStep::NonCriticalServiceStop => "non-critical-service-stop",
            SequenceStep::SurveillanceEnhancement => "surveillance-enhancement",
            SequenceStep::ZoneIsolation { .. } => "zone-isolation",
            SequenceStep::RuleSetActivation => "rule-set-activation",
            SequenceStep::PrimaryStop { .. } => "primary-stop",
            SequenceStep::BackupStart { .. } => "backup-start",
            SequenceStep::EvacuationRouteUnlock => "evacuation-route-unlock",
            SequenceStep::EvacuationLighting => "evacuation-lighting",
            SequenceStep::NonEssentialPowerDown => "non-essential-power-down",
            SequenceStep::EmergencyComms => "emergency-comms",
            SequenceStep::BackupActivation => "backup-activation",
            SequenceStep::PartialContainment => "partial-containment",
            SequenceStep::RecoverySequence => "recovery-sequence",
        }
    }
}

impl fmt::Display for SequenceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceStep::ZoneIsolation { zone } => write!(f, "{}[{}]", self.name(), zone),
            SequenceStep::PrimaryStop { service } | SequenceStep::BackupStart { service } => {
                write!(f, "{}[{}]", self.name(), service)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Step outcomes collected during one dispatch
#[derive(Debug, Default)]
pub struct SequenceTracker {
    attempted: u32,
    succeeded: u32,
    failed: u32,
    first_failure: Option<SequenceStep>,
    failures: Vec<(SequenceStep, ControllerError)>,
    warnings: Vec<String>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failable step. Returns whether it succeeded.
    pub fn record(&mut self, step: SequenceStep, outcome: ControllerResult<()>) -> bool {
        self.attempted += 1;
        match outcome {
            Ok(()) => {
                self.succeeded += 1;
                true
            }
            Err(err) => {
                warn!(step = %step, error = %err, "Sequence step failed");
                crate::metrics::record_step_failure(step.name());
                self.failed += 1;
                if self.first_failure.is_none() {
                    self.first_failure = Some(step.clone());
                }
                self.failures.push((step, err));
                false
            }
        }
    }

    /// Record a step with no failure path
    pub fn record_best_effort(&mut self, _step: SequenceStep) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    /// Record a degraded-but-known outcome
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(warning = %message, "Sequence left a degraded state");
        self.warnings.push(message);
    }

    pub fn attempted(&self) -> u32 {
        self.attempted
    }

    pub fn succeeded(&self) -> u32 {
        self.succeeded
    }

    pub fn failed(&self) -> u32 {
        self.failed
    }

    pub fn warning_count(&self) -> u32 {
        self.warnings.len() as u32
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// First failing step, which decides the overall result
    pub fn first_failure(&self) -> Option<&SequenceStep> {
        self.first_failure.as_ref()
    }

    /// 0 when no step failed, otherwise the first failure's code
    pub fn result_code(&self) -> i32 {
        self.first_failure
            .as_ref()
            .map_or(crate::error::RESULT_SUCCESS, SequenceStep::failure_code)
    }

    /// Failed steps with their controller errors, in attempt order
    pub fn error_details(&self) -> String {
        self.failures
            .iter()
            .map(|(step, err)| format!("{step}: {err}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
