//! Facility operating mode

use super::ResponseType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode snapshotted into every report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemMode {
    #[default]
    Normal,
    HeightenedSecurity,
    Emergency,
    Lockdown,
    Recovery,
}

impl SystemMode {
    /// Escalation order used when a dispatch may only raise the mode
    fn rank(self) -> u8 {
        match self {
            SystemMode::Normal => 0,
            SystemMode::Recovery => 1,
            SystemMode::HeightenedSecurity => 2,
            SystemMode::Emergency => 3,
            SystemMode::Lockdown => 4,
        }
    }

    /// The higher of `self` and `floor`
    pub fn at_least(self, floor: SystemMode) -> SystemMode {
        if self.rank() >= floor.rank() {
            self
        } else {
            floor
        }
    }

    /// Mode after a dispatch of `response_type` finished.
    ///
    /// `clean` is true when no step failed and the deadline held.
    pub fn after_dispatch(self, response_type: ResponseType, clean: bool) -> SystemMode {
        match (response_type, clean) {
            (ResponseType::Lockdown, true) => SystemMode::Lockdown,
            (ResponseType::Lockdown, false) => self.at_least(SystemMode::Emergency),
            (ResponseType::FullRecovery, true) => SystemMode::Recovery,
            (ResponseType::CommsPriority, _) | (_, false) => self,
            (_, true) => self.at_least(SystemMode::HeightenedSecurity),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SystemMode::Normal => "normal",
            SystemMode::HeightenedSecurity => "heightened-security",
            SystemMode::Emergency => "emergency",
            SystemMode::Lockdown => "lockdown",
            SystemMode::Recovery => "recovery",
        }
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
