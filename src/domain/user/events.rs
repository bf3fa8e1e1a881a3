use uuid::Uuid;

use super::value_objects::Email;
use crate::event_sourcing::{require_field, DomainEvent, EventData, EventDataError};

// ============================================================================
// User Domain Events
// ============================================================================

/// Wire field carrying the user identifier.
const FIELD_UUID: &str = "uuid";
/// Wire field carrying the signed-in email.
const FIELD_EMAIL: &str = "email";

/// A user signed in - one immutable fact plus its identifying key.
///
/// Constructed once via `create` from typed values, or rebuilt via
/// `deserialize` from untrusted wire data; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSignedIn {
    user_id: Uuid,
    email: Email,
}

impl UserSignedIn {
    /// Trusted construction from already-validated values.
    ///
    /// Infallible: UUID validity is enforced by the `Uuid` type and email
    /// validity by `Email::new`, so a partially-constructed event cannot
    /// exist.
    pub fn create(user_id: Uuid, email: Email) -> Self {
        Self { user_id, email }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}

impl DomainEvent for UserSignedIn {
    fn event_type() -> &'static str {
        "UserSignedIn"
    }

    fn serialize(&self) -> EventData {
        EventData::from([
            (FIELD_UUID.to_string(), self.user_id.to_string()),
            (FIELD_EMAIL.to_string(), self.email.as_str().to_string()),
        ])
    }

    fn deserialize(data: &EventData) -> Result<Self, EventDataError> {
        // Both keys must exist before either value is parsed.
        let uuid_raw = require_field(data, FIELD_UUID)?;
        let email_raw = require_field(data, FIELD_EMAIL)?;

        let user_id = Uuid::parse_str(uuid_raw).map_err(|e| EventDataError::MalformedValue {
            field: FIELD_UUID,
            reason: e.to_string(),
        })?;
        let email = Email::new(email_raw).map_err(|e| EventDataError::MalformedValue {
            field: FIELD_EMAIL,
            reason: e.to_string(),
        })?;

        Ok(Self::create(user_id, email))
    }
}

// ============================================================================
// Tests
// ============================================================================
