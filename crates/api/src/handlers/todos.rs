//! Handlers for the todo resource (create, edit, delete, paginated listing).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tickbox_core::error::CoreError;
use tickbox_core::todo::{NewTodo, Todo};
use tickbox_core::types::DbId;
use tickbox_core::validation::validate_todo_text;

use crate::error::{AppError, AppResult};
use crate::middleware::session::SessionUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Number of todos returned per `/pagination_dashboard` page.
const PAGE_SIZE: i64 = 5;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /pagination_dashboard`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Number of records to skip; defaults to 0.
    pub skip: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /create-item
///
/// Store a new todo under the session's username.
pub async fn create_item(
    State(state): State<AppState>,
    user: SessionUser,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<DataResponse<Todo>>)> {
    // 1. Validate the text.
    let text = validate_todo_text(body.get("todo"), "todo")
        .map_err(|v| AppError::Core(CoreError::Validation(v.to_string())))?;

    // 2. Ownership comes from the session, never from the body.
    let todo = state
        .todos
        .insert(&NewTodo {
            username: user.username,
            text,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: todo })))
}

/// POST /edit-item
///
/// Replace the text of an existing todo owned by the current user.
pub async fn edit_item(
    State(state): State<AppState>,
    user: SessionUser,
    Json(body): Json<Value>,
) -> AppResult<Json<MessageResponse>> {
    // 1. Both the id and the replacement text are required.
    let id = parse_todo_id(body.get("id"))?;
    let text = validate_todo_text(body.get("newData"), "newData")
        .map_err(|v| AppError::Core(CoreError::Validation(v.to_string())))?;

    // 2. The todo must exist...
    let todo = state.todos.find(id).await?.ok_or_else(|| not_found(id))?;

    // 3. ...and belong to the requesting user.
    if todo.username != user.username {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not allowed to edit, authorisation failed".into(),
        )));
    }

    // 4. Apply the update; the row can vanish between the check and the write.
    let updated = state.todos.update_text(id, &text).await?;
    if !updated {
        return Err(not_found(id));
    }

    Ok(Json(MessageResponse::new(
        "Todo has been updated successfully",
    )))
}

/// POST /delete-item
///
/// Delete a todo owned by the current user.
pub async fn delete_item(
    State(state): State<AppState>,
    user: SessionUser,
    Json(body): Json<Value>,
) -> AppResult<Json<MessageResponse>> {
    // 1. The id is required.
    let id = parse_todo_id(body.get("id"))?;

    // 2. The todo must exist...
    let todo = state.todos.find(id).await?.ok_or_else(|| not_found(id))?;

    // 3. ...and belong to the requesting user.
    if todo.username != user.username {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not allowed to delete, authorisation failed".into(),
        )));
    }

    // 4. Delete; the row can vanish between the check and the write.
    let deleted = state.todos.delete(id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    Ok(Json(MessageResponse::new(
        "Todo has been deleted successfully",
    )))
}

/// GET /pagination_dashboard?skip=10
///
/// Page through the current user's todos in creation order, five at a time.
pub async fn pagination_dashboard(
    State(state): State<AppState>,
    user: SessionUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Todo>>>> {
    // Negative skips clamp to the first page.
    let skip = params.skip.unwrap_or(0).max(0);

    let todos = state
        .todos
        .list_by_owner(&user.username, skip, PAGE_SIZE)
        .await?;

    Ok(Json(DataResponse { data: todos }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Extract the todo id from the body, accepting a JSON number or a numeric
/// string.
fn parse_todo_id(value: Option<&Value>) -> Result<DbId, AppError> {
    let parsed = match value {
        None | Some(Value::Null) => {
            return Err(AppError::Core(CoreError::Validation(
                "Missing field: id".into(),
            )))
        }
        Some(Value::String(s)) if s.is_empty() => {
            return Err(AppError::Core(CoreError::Validation(
                "Missing field: id".into(),
            )))
        }
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        Some(_) => None,
    };

    parsed.ok_or_else(|| AppError::Core(CoreError::Validation("Invalid todo id".into())))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "todo", id })
}
