use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Event Serialization Contract
// ============================================================================
//
// Domain events cross process boundaries (store, bus, log) as a flat
// string-to-string map. The event kind travels out-of-band in whatever
// envelope wraps the payload; it is never a field inside the map itself.
//
// This is GENERIC and works with ANY event type.
//
// ============================================================================

/// Flat wire representation of one domain event.
pub type EventData = HashMap<String, String>;

/// Generic Domain Event trait
///
/// All domain events must implement this trait to cross a serialization
/// boundary.
pub trait DomainEvent: Sized + Clone + Send + Sync {
    /// Wire discriminator for this event kind, carried out-of-band.
    fn event_type() -> &'static str
    where
        Self: Sized;

    /// Canonical wire form: one key per payload field plus the identifier.
    /// Deterministic; the same event always produces the same map.
    fn serialize(&self) -> EventData;

    /// Untrusted inverse of `serialize`. Presence of every required key is
    /// checked before any value is parsed.
    fn deserialize(data: &EventData) -> Result<Self, EventDataError>;
}

/// Failures raised while rebuilding an event from its wire form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventDataError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("malformed value for `{field}`: {reason}")]
    MalformedValue {
        field: &'static str,
        reason: String,
    },
}

/// Look up a required wire field without parsing it.
pub fn require_field<'a>(
    data: &'a EventData,
    field: &'static str,
) -> Result<&'a str, EventDataError> {
    data.get(field)
        .map(String::as_str)
        .ok_or(EventDataError::MissingField(field))
}

// ============================================================================
// Tests
// ============================================================================
