//! Shared response envelope types for API handlers.
//!
//! Successful responses carrying a payload use a `{ "data": ... }` envelope;
//! plain acknowledgements use `{ "message": ... }`. Use these types instead
//! of ad-hoc `serde_json::json!` blocks to get compile-time type safety and
//! consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "message": ... }` acknowledgement envelope.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
