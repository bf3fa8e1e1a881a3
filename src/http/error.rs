use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

use super::failure::{Failure, FailureKind};
use crate::config::Environment;

// ============================================================================
// Error Translator - Boundary Failure Classification
// ============================================================================
//
// The single point where failures become user-visible output. Translation is
// total: every failure kind maps to exactly one status and one body, and the
// translator itself never fails, logs or mutates the failure.
//
// Verbosity policy: production responses keep the failure message in `detail`
// but never carry file/line/stack; dev responses add the full diagnostic
// block. The asymmetry is intentional.
//
// ============================================================================

pub const ERROR_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Complete error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub errors: ErrorObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<DiagnosticMeta>,
}

/// The always-present error object.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorObject {
    pub title: String,
    pub detail: String,
    pub code: i64,
    pub status: u16,
}

/// Dev-only diagnostic block.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticMeta {
    pub file: String,
    pub line: u32,
    pub message: String,
    pub trace: Vec<TraceFrame>,
    #[serde(rename = "traceString")]
    pub trace_string: String,
}

/// One structured backtrace frame.
#[derive(Debug, Clone, Serialize)]
pub struct TraceFrame {
    pub index: usize,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Translates failures into uniform HTTP error responses.
///
/// The environment mode is injected once at construction and held for the
/// translator's lifetime; it is never re-read per call.
#[derive(Debug, Clone)]
pub struct ErrorTranslator {
    environment: Environment,
}

impl ErrorTranslator {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    /// Pure classification: (failure, mode) -> (status, body).
    pub fn translate(&self, failure: &Failure) -> (StatusCode, ErrorBody) {
        let status = Self::status_code(failure);

        let errors = ErrorObject {
            title: failure.kind().identifier().replace("::", "."),
            detail: failure.message().to_string(),
            code: failure.code().unwrap_or(0),
            status: status.as_u16(),
        };

        let meta = self.environment.is_dev().then(|| Self::diagnostics(failure));

        (status, ErrorBody { errors, meta })
    }

    /// Build the HTTP response; the status on the wire equals `errors.status`.
    pub fn to_response(&self, failure: &Failure) -> HttpResponse {
        let (status, body) = self.translate(failure);

        // Serializing ErrorBody cannot realistically fail, but translation
        // must stay total, so fall back to a fixed body instead of panicking.
        let payload = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"errors":{"title":"app.InternalException","detail":"error serialization failed","code":0,"status":500}}"#
                .to_string()
        });

        HttpResponse::build(status)
            .content_type(ERROR_CONTENT_TYPE)
            .body(payload)
    }

    /// First match wins; a failure that carries its own status keeps it even
    /// when it also reads like a lookup miss.
    fn status_code(failure: &Failure) -> StatusCode {
        match failure.kind() {
            FailureKind::Http(status) => status,
            FailureKind::InvalidArgument => StatusCode::BAD_REQUEST,
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn diagnostics(failure: &Failure) -> DiagnosticMeta {
        let trace_string = failure.backtrace().to_string();

        DiagnosticMeta {
            file: failure.location().file().to_string(),
            line: failure.location().line(),
            message: failure.message().to_string(),
            trace: parse_trace(&trace_string),
            trace_string,
        }
    }
}

/// Split a flattened backtrace into structured frames.
///
/// The text form is `N: symbol` lines, each optionally followed by an
/// `at file:line:col` line.
fn parse_trace(trace_string: &str) -> Vec<TraceFrame> {
    let mut frames: Vec<TraceFrame> = Vec::new();

    for line in trace_string.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                frame.location = Some(rest.to_string());
            }
        } else if let Some((index, symbol)) = line.split_once(": ") {
            if let Ok(index) = index.parse::<usize>() {
                frames.push(TraceFrame {
                    index,
                    symbol: symbol.trim().to_string(),
                    location: None,
                });
            }
        }
    }

    frames
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::CONTENT_TYPE;
    use serde_json::Value;

    fn dev() -> ErrorTranslator {
        ErrorTranslator::new(Environment::Dev)
    }

    fn prod() -> ErrorTranslator {
        ErrorTranslator::new(Environment::Production)
    }

    fn to_value(body: &ErrorBody) -> Value {
        serde_json::to_value(body).unwrap()
    }

    #[test]
    fn test_carried_http_status_is_used_verbatim() {
        let failure = Failure::http(StatusCode::SERVICE_UNAVAILABLE, "backend gone");
        let (status, body) = prod().translate(&failure);

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.errors.status, 503);
    }

    #[test]
    fn test_carried_status_wins_over_lookup_miss_wording() {
        // Reads like a not-found, but the HTTP layer already chose 410.
        let failure = Failure::http(StatusCode::GONE, "User 123 not found");
        let (status, _) = prod().translate(&failure);

        assert_eq!(status, StatusCode::GONE);
    }

    #[test]
    fn test_invalid_argument_maps_to_400() {
        let (status, _) = prod().translate(&Failure::invalid_argument("bad input"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, _) = prod().translate(&Failure::not_found("missing"));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unclassified_maps_to_500() {
        let (status, _) = prod().translate(&Failure::internal("boom"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_title_is_the_dot_separated_kind_identifier() {
        let (_, body) = prod().translate(&Failure::not_found("missing"));
        assert_eq!(body.errors.title, "domain.query.NotFoundException");

        let (_, body) = prod().translate(&Failure::internal("boom"));
        assert_eq!(body.errors.title, "app.InternalException");
    }

    #[test]
    fn test_code_defaults_to_zero_and_is_carried_when_set() {
        let (_, body) = prod().translate(&Failure::internal("boom"));
        assert_eq!(body.errors.code, 0);

        let (_, body) = prod().translate(&Failure::internal("boom").with_code(1042));
        assert_eq!(body.errors.code, 1042);
    }

    #[test]
    fn test_detail_is_the_message_in_both_modes() {
        let failure = Failure::internal("database exploded");

        let (_, prod_body) = prod().translate(&failure);
        let (_, dev_body) = dev().translate(&failure);

        assert_eq!(prod_body.errors.detail, "database exploded");
        assert_eq!(dev_body.errors.detail, "database exploded");
    }

    #[test]
    fn test_production_body_has_no_meta_key() {
        let (_, body) = prod().translate(&Failure::internal("boom"));
        let value = to_value(&body);

        assert!(value.get("meta").is_none());
        assert!(value.get("errors").is_some());
    }

    #[test]
    fn test_dev_meta_has_all_five_fields() {
        let failure = Failure::internal("boom");
        let (_, body) = dev().translate(&failure);
        let value = to_value(&body);

        let meta = value.get("meta").expect("meta must be present in dev");
        assert!(meta["file"].as_str().unwrap().ends_with("error.rs"));
        assert!(meta["line"].as_u64().unwrap() > 0);
        assert_eq!(meta["message"], "boom");
        assert!(meta["trace"].is_array());
        assert!(!meta["traceString"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_not_found_end_to_end_production_shape() {
        let failure = Failure::not_found("User 123 not found");
        let (status, body) = prod().translate(&failure);

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            to_value(&body),
            serde_json::json!({
                "errors": {
                    "title": "domain.query.NotFoundException",
                    "detail": "User 123 not found",
                    "code": 0,
                    "status": 404
                }
            })
        );
    }

    #[test]
    fn test_response_carries_the_vendor_content_type() {
        let response = prod().to_response(&Failure::not_found("missing"));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            ERROR_CONTENT_TYPE
        );
    }

    #[test]
    fn test_parse_trace_splits_frames() {
        let text = "   0: user_api::http::failure::Failure::new\n             \
                    at /src/http/failure.rs:52:23\n   \
                    1: core::ops::function::FnOnce::call_once\n";

        let frames = parse_trace(text);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].index, 0);
        assert_eq!(frames[0].symbol, "user_api::http::failure::Failure::new");
        assert_eq!(
            frames[0].location.as_deref(),
            Some("/src/http/failure.rs:52:23")
        );
        assert_eq!(frames[1].index, 1);
        assert!(frames[1].location.is_none());
    }
}
