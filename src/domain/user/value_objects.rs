use serde::{Deserialize, Serialize};

use super::errors::UserError;

// ============================================================================
// User Value Objects
// ============================================================================

const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 255;

/// User email address, validated at construction
///
/// The accepted text is stored exactly as given; validation never normalizes
/// or lowercases it. Serde deserialization goes through the same validation,
/// so an `Email` obtained from any source is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Result<Self, UserError> {
        let email = email.into();

        if email.is_empty() {
            return Err(UserError::EmptyEmail);
        }

        let mut parts = email.splitn(2, '@');
        let local = parts.next().unwrap_or("");

        let valid = match parts.next() {
            Some(domain) => is_valid_local(local) && is_valid_domain(domain),
            None => false,
        };

        if valid {
            Ok(Self(email))
        } else {
            Err(UserError::InvalidEmail(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_local(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local
        .chars()
        .all(|c| !c.is_whitespace() && !c.is_control() && c != '@')
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl TryFrom<String> for Email {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
