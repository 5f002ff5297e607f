//! Per-session rate limiting for todo write routes.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tickbox_core::error::CoreError;
use tickbox_core::rate_limit::AdmitDecision;

use crate::error::AppError;
use crate::middleware::session::SessionUser;
use crate::state::AppState;

/// Reject write requests arriving faster than the configured per-session
/// interval.
///
/// Wire up with [`axum::middleware::from_fn_with_state`] on the routes that
/// mutate todos. The [`SessionUser`] extractor runs first, so anonymous
/// requests are redirected to login before the limiter is consulted. The
/// admit decision itself lives in storage and is atomic, which keeps
/// concurrent requests from sharing one slot.
pub async fn require_write_slot(
    State(state): State<AppState>,
    user: SessionUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let min_interval = Duration::from_secs(state.config.rate_limit_interval_secs);

    match state.access.admit(user.session_id, min_interval).await? {
        AdmitDecision::Allow => Ok(next.run(request).await),
        AdmitDecision::Deny => {
            tracing::debug!(session_id = %user.session_id, "Write request rate limited");
            Err(AppError::Core(CoreError::RateLimited))
        }
    }
}
