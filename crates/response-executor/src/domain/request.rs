//! Response requests
//!
//! A request is immutable once submitted. Its `timestamp` doubles as the
//! correlation id of the report produced by its dispatch.

use super::{now_millis, ZoneMask};
use crate::error::UnknownResponseType;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 10;
pub const MIN_AUTH_LEVEL: u8 = 1;
pub const MAX_AUTH_LEVEL: u8 = 5;

/// Maximum trigger description length in bytes
pub const TRIGGER_EVENT_MAX_LEN: usize = 63;

/// How long the panic-button lockdown stays active
pub const EMERGENCY_LOCKDOWN_DURATION_SECS: u32 = 3600;

/// Trigger description attached to panic-button lockdowns
pub const EMERGENCY_TRIGGER_EVENT: &str = "manual emergency trigger";

/// Type of response to execute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseType {
    /// Complete facility lockdown
    Lockdown,
    /// Network segmentation and isolation
    NetworkIsolate,
    /// Critical service failover
    ServiceFailover,
    /// Emergency evacuation
    Evacuation,
    /// Backup system activation
    BackupActivate,
    /// Communication priority routing
    CommsPriority,
    /// Partial containment measures
    PartialContain,
    /// Full system recovery
    FullRecovery,
}

impl ResponseType {
    pub const ALL: [ResponseType; 8] = [
        ResponseType::Lockdown,
        ResponseType::NetworkIsolate,
        ResponseType::ServiceFailover,
        ResponseType::Evacuation,
        ResponseType::BackupActivate,
        ResponseType::CommsPriority,
        ResponseType::PartialContain,
        ResponseType::FullRecovery,
    ];

    /// Raw wire code (1-based)
    pub fn code(self) -> u8 {
        match self {
            ResponseType::Lockdown => 1,
            ResponseType::NetworkIsolate => 2,
            ResponseType::ServiceFailover => 3,
            ResponseType::Evacuation => 4,
            ResponseType::BackupActivate => 5,
            ResponseType::CommsPriority => 6,
            ResponseType::PartialContain => 7,
            ResponseType::FullRecovery => 8,
        }
    }

    /// Whether the response acts on specific zones and needs a non-empty mask
    pub fn is_zone_scoped(self) -> bool {
        matches!(
            self,
            ResponseType::Lockdown
                | ResponseType::NetworkIsolate
                | ResponseType::Evacuation
                | ResponseType::PartialContain
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::Lockdown => "lockdown",
            ResponseType::NetworkIsolate => "network-isolate",
            ResponseType::ServiceFailover => "service-failover",
            ResponseType::Evacuation => "evacuation",
            ResponseType::BackupActivate => "backup-activate",
            ResponseType::CommsPriority => "comms-priority",
            ResponseType::PartialContain => "partial-contain",
            ResponseType::FullRecovery => "full-recovery",
        }
    }
}

impl TryFrom<u8> for ResponseType {
    type Error = UnknownResponseType;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ResponseType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or(UnknownResponseType(code))
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied response request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRequest {
    pub response_type: ResponseType,
    /// Severity level (1-10)
    pub severity: u8,
    pub target_zones: ZoneMask,
    /// Seconds the response should remain active
    pub duration_secs: u32,
    /// Required authorization level (1-5), carried and range-checked only
    pub auth_level: u8,
    pub trigger_event: String,
    /// Creation time in Unix epoch milliseconds; also the report's response id
    pub timestamp: u64,
    /// Advisory, not consumed by the current sequences
    pub retry_count: u32,
    /// Dispatch deadline in seconds; 0 uses the configured max response time
    pub timeout_secs: u16,
}

impl ResponseRequest {
    /// Create a request stamped with the current time
    pub fn new(
        response_type: ResponseType,
        severity: u8,
        target_zones: ZoneMask,
        trigger_event: impl Into<String>,
    ) -> Self {
        Self {
            response_type,
            severity,
            target_zones,
            duration_secs: 0,
            auth_level: MIN_AUTH_LEVEL,
            trigger_event: trigger_event.into(),
            timestamp: now_millis(),
            retry_count: 0,
            timeout_secs: 0,
        }
    }

    /// Maximal-severity lockdown used by the panic button
    pub fn emergency_lockdown(timestamp: u64) -> Self {
        Self {
            response_type: ResponseType::Lockdown,
            severity: MAX_SEVERITY,
            target_zones: ZoneMask::ALL,
            duration_secs: EMERGENCY_LOCKDOWN_DURATION_SECS,
            auth_level: MAX_AUTH_LEVEL,
            trigger_event: EMERGENCY_TRIGGER_EVENT.to_string(),
            timestamp,
            retry_count: 0,
            timeout_secs: 0,
        }
    }

    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_auth_level(mut self, auth_level: u8) -> Self {
        self.auth_level = auth_level;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u16) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Correlation id of the report this request produces
    pub fn response_id(&self) -> u64 {
        self.timestamp
    }
}
