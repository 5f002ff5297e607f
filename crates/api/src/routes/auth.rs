//! Route definitions for registration, verification, login, and logout.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes for account and session management.
///
/// ```text
/// POST /register                 -> register (public)
/// GET  /verifytoken/{token}      -> verify email (public)
/// POST /login                    -> login (public)
/// GET  /dashboard                -> identity snapshot (requires session)
/// POST /logout                   -> logout current session (requires session)
/// POST /logout_from_all_devices  -> logout everywhere (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/verifytoken/{token}", get(auth::verify_email))
        .route("/login", post(auth::login))
        .route("/dashboard", get(auth::dashboard))
        .route("/logout", post(auth::logout))
        .route("/logout_from_all_devices", post(auth::logout_all))
}
