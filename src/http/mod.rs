// ============================================================================
// HTTP Boundary - Failures, Error Translation & Routes
// ============================================================================
//
// The outermost edge of request handling. Failures produced anywhere in the
// application are shaped into responses here and nowhere else.
//
// ============================================================================

pub mod error;
pub mod failure;
pub mod server;

// Re-export for convenience
pub use error::{DiagnosticMeta, ErrorBody, ErrorObject, ErrorTranslator, TraceFrame, ERROR_CONTENT_TYPE};
pub use failure::{Failure, FailureKind};
pub use server::{start_http_server, SignInLog};
