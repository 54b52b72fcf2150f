//! Structural request validation
//!
//! Pure checks only. `dispatch` does not call these; callers validate
//! before submitting when they want to.

use super::request::{
    ResponseRequest, ResponseType, MAX_AUTH_LEVEL, MAX_SEVERITY, MIN_AUTH_LEVEL, MIN_SEVERITY,
    TRIGGER_EVENT_MAX_LEN,
};
use thiserror::Error;

/// First violated validation rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("severity {0} outside 1..=10")]
    SeverityOutOfRange(u8),

    #[error("auth level {0} outside 1..=5")]
    AuthLevelOutOfRange(u8),

    #[error("{0} requires at least one target zone")]
    MissingTargetZones(ResponseType),

    #[error("trigger event is empty")]
    EmptyTriggerEvent,

    #[error("trigger event is {len} bytes, limit is {max}")]
    TriggerEventTooLong { len: usize, max: usize },
}

/// Check a request, returning the first violated rule
pub fn validate(request: &ResponseRequest) -> Result<(), ValidationError> {
    if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&request.severity) {
        return Err(ValidationError::SeverityOutOfRange(request.severity));
    }
    if !(MIN_AUTH_LEVEL..=MAX_AUTH_LEVEL).contains(&request.auth_level) {
        return Err(ValidationError::AuthLevelOutOfRange(request.auth_level));
    }
    if request.response_type.is_zone_scoped() && request.target_zones.is_empty() {
        return Err(ValidationError::MissingTargetZones(request.response_type));
    }
    if request.trigger_event.is_empty() {
        return Err(ValidationError::EmptyTriggerEvent);
    }
    if request.trigger_event.len() > TRIGGER_EVENT_MAX_LEN {
        return Err(ValidationError::TriggerEventTooLong {
            len: request.trigger_event.len(),
            max: TRIGGER_EVENT_MAX_LEN,
        });
    }
    Ok(())
}

/// Boolean form of [`validate`]
pub fn validate_parameters(request: &ResponseRequest) -> bool {
    validate(request).is_ok()
}
