//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use tickbox_core::error::CoreError;
use tickbox_core::types::{DbId, SessionId};

use crate::auth::session_token::verify_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the signed session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Authenticated user extracted from the signed session cookie.
///
/// Use this as an extractor parameter in any handler that requires a live
/// session:
///
/// ```ignore
/// async fn my_handler(user: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Every failure mode (missing cookie, bad signature, unknown session,
/// session not authenticated) rejects with [`CoreError::Unauthenticated`],
/// which renders as a redirect to the login page.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The session backing this request.
    pub session_id: SessionId,
    /// The user's internal database id.
    pub user_id: DbId,
    /// The username snapshotted into the session at login.
    pub username: String,
    /// The email snapshotted into the session at login.
    pub email: String,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let raw = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| unauthenticated("Missing session cookie"))?;

        // Signature check happens before any storage lookup.
        let session_id = verify_session_token(&raw, &state.config.session_secret)
            .ok_or_else(|| unauthenticated("Invalid session cookie"))?;

        let session = state
            .sessions
            .find(session_id)
            .await?
            .ok_or_else(|| unauthenticated("Unknown session"))?;

        if !session.is_authenticated {
            return Err(unauthenticated("Session is not authenticated"));
        }

        Ok(SessionUser {
            session_id: session.id,
            user_id: session.identity.user_id,
            username: session.identity.username,
            email: session.identity.email,
        })
    }
}

fn unauthenticated(reason: &str) -> AppError {
    AppError::Core(CoreError::Unauthenticated(reason.to_string()))
}
