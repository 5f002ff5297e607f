//! Route definitions for the todo resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::todos;
use crate::middleware::rate_limit::require_write_slot;
use crate::state::AppState;

/// Routes for todo management.
///
/// ```text
/// POST /create-item           -> create todo (rate-limited)
/// POST /edit-item             -> edit todo (rate-limited)
/// POST /delete-item           -> delete todo (rate-limited)
/// GET  /pagination_dashboard  -> paginated listing
/// ```
///
/// The three write routes share the per-session rate limiter; the listing is
/// not throttled.
pub fn router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/create-item", post(todos::create_item))
        .route("/edit-item", post(todos::edit_item))
        .route("/delete-item", post(todos::delete_item))
        .route_layer(from_fn_with_state(state, require_write_slot));

    Router::new()
        .merge(writes)
        .route("/pagination_dashboard", get(todos::pagination_dashboard))
}
