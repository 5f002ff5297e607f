//! Row struct for the `todos` table.

use sqlx::FromRow;
use tickbox_core::todo::Todo;
use tickbox_core::types::{DbId, Timestamp};

/// A todo row.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: DbId,
    pub username: String,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            username: row.username,
            text: row.text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
