//! HTTP route tree assembly.

pub mod auth;
pub mod health;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                 POST  register (public)
/// /verifytoken/{token}      GET   verify email (public)
/// /login                    POST  login (public)
/// /dashboard                GET   identity snapshot (session)
/// /logout                   POST  destroy current session (session)
/// /logout_from_all_devices  POST  destroy all sessions for the user (session)
///
/// /create-item              POST  create todo (session, rate-limited)
/// /edit-item                POST  edit todo (session, rate-limited)
/// /delete-item              POST  delete todo (session, rate-limited)
/// /pagination_dashboard     GET   paginated listing (session)
///
/// /health                   GET   liveness + storage reachability (public)
/// ```
///
/// The rate-limiting layer needs the state at construction time, which is why
/// this takes an [`AppState`] even though the router is state-generic.
pub fn app_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(todos::router(state))
        .merge(health::router())
}
