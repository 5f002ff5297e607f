use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;
use tickbox_core::error::CoreError;

/// Error type returned by every handler.
///
/// Domain failures arrive as [`CoreError`] and are translated here into the
/// `{"error", "code"}` JSON body clients consume, plus two HTTP-only
/// variants for faults with no domain meaning. Unauthenticated requests are
/// the one exception to the JSON shape: they become a redirect to the login
/// page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain failure, mapped per variant below.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body or parameters were unusable.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A fault whose detail must not reach the client.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                // Duplicate registrations surface to clients as plain bad
                // requests, not 409s.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
                CoreError::Unauthenticated(reason) => {
                    tracing::debug!(reason = %reason, "Unauthenticated request, redirecting");
                    return Redirect::to("/login").into_response();
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::RateLimited => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    core.to_string(),
                ),
                CoreError::Storage(msg) => {
                    tracing::error!(error = %msg, "Storage error");
                    scrubbed()
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    scrubbed()
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                scrubbed()
            }
        };

        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

/// The sanitized 500 tuple; internals go to the log, never to the client.
fn scrubbed() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
