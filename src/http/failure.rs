use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;

use actix_web::http::StatusCode;

use crate::domain::user::UserError;
use crate::event_sourcing::EventDataError;

// ============================================================================
// Application Failure - Closed Error Taxonomy
// ============================================================================
//
// Every failure that can surface at the HTTP boundary carries one of four
// kinds, fixed at the point the failure is constructed or wrapped. The
// boundary never re-derives the kind by inspecting messages or source types.
//
// ============================================================================

/// Closed set of failure categories used to select the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Originates from the HTTP layer itself and carries its intended status.
    Http(StatusCode),
    /// Caller-supplied data violated a precondition.
    InvalidArgument,
    /// Aggregate, entity or resource lookup failed.
    NotFound,
    /// Anything else - an operational/internal fault.
    Unclassified,
}

impl FailureKind {
    /// Namespaced identifier for this kind; the response title is derived
    /// from it.
    pub fn identifier(&self) -> &'static str {
        match self {
            FailureKind::Http(_) => "ui::http::HttpException",
            FailureKind::InvalidArgument => "domain::InvalidArgumentException",
            FailureKind::NotFound => "domain::query::NotFoundException",
            FailureKind::Unclassified => "app::InternalException",
        }
    }

    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Http(_) => "http",
            FailureKind::InvalidArgument => "invalid_argument",
            FailureKind::NotFound => "not_found",
            FailureKind::Unclassified => "unclassified",
        }
    }
}

/// One failed request's worth of error context.
///
/// Immutable after construction. Source location and backtrace are captured
/// where the failure is created, not where it is translated.
#[derive(Debug)]
pub struct Failure {
    kind: FailureKind,
    message: String,
    code: Option<i64>,
    location: &'static Location<'static>,
    backtrace: Backtrace,
}

impl Failure {
    #[track_caller]
    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            location: Location::caller(),
            backtrace: Backtrace::force_capture(),
        }
    }

    /// Failure raised by the HTTP layer itself; the carried status is used
    /// verbatim by the translator.
    #[track_caller]
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Http(status), message)
    }

    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidArgument, message)
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound, message)
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unclassified, message)
    }

    /// Attach an application-level numeric code.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<i64> {
        self.code
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Failure {}

// Envelope and domain validation failures surface as invalid arguments;
// the kind is fixed here, at the wrapping point.

impl From<UserError> for Failure {
    fn from(err: UserError) -> Self {
        Failure::invalid_argument(err.to_string())
    }
}

impl From<EventDataError> for Failure {
    fn from(err: EventDataError) -> Self {
        Failure::invalid_argument(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_fix_the_kind() {
        assert_eq!(
            Failure::http(StatusCode::IM_A_TEAPOT, "teapot").kind(),
            FailureKind::Http(StatusCode::IM_A_TEAPOT)
        );
        assert_eq!(
            Failure::invalid_argument("bad").kind(),
            FailureKind::InvalidArgument
        );
        assert_eq!(Failure::not_found("gone").kind(), FailureKind::NotFound);
        assert_eq!(Failure::internal("boom").kind(), FailureKind::Unclassified);
    }

    #[test]
    fn test_code_is_absent_unless_attached() {
        let failure = Failure::not_found("x");
        assert_eq!(failure.code(), None);

        let failure = failure.with_code(4041);
        assert_eq!(failure.code(), Some(4041));
    }

    #[test]
    fn test_location_points_at_the_construction_site() {
        let failure = Failure::internal("boom");
        assert!(failure.location().file().ends_with("failure.rs"));
        assert!(failure.location().line() > 0);
    }

    #[test]
    fn test_display_is_the_message() {
        assert_eq!(Failure::not_found("User 123 not found").to_string(), "User 123 not found");
    }

    #[test]
    fn test_validation_errors_wrap_as_invalid_argument() {
        let failure = Failure::from(UserError::EmptyEmail);
        assert_eq!(failure.kind(), FailureKind::InvalidArgument);
        assert_eq!(failure.message(), "Email cannot be empty");

        let failure = Failure::from(EventDataError::MissingField("uuid"));
        assert_eq!(failure.kind(), FailureKind::InvalidArgument);
        assert_eq!(failure.message(), "missing field `uuid`");
    }

    #[test]
    fn test_identifiers_are_namespaced() {
        assert_eq!(
            FailureKind::NotFound.identifier(),
            "domain::query::NotFoundException"
        );
        assert_eq!(
            FailureKind::Http(StatusCode::BAD_REQUEST).identifier(),
            "ui::http::HttpException"
        );
    }
}
