//! Repository for the `todos` table.

use async_trait::async_trait;
use tickbox_core::error::CoreError;
use tickbox_core::store::TodoStore;
use tickbox_core::todo::{NewTodo, Todo};
use tickbox_core::types::DbId;

use crate::models::todo::TodoRow;
use crate::repositories::storage_error;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, text, created_at, updated_at";

/// PostgreSQL-backed [`TodoStore`].
pub struct TodoRepo {
    pool: DbPool,
}

impl TodoRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for TodoRepo {
    async fn insert(&self, input: &NewTodo) -> Result<Todo, CoreError> {
        let query = format!(
            "INSERT INTO todos (username, text)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(&input.username)
            .bind(&input.text)
            .fetch_one(&self.pool)
            .await
            .map(Into::into)
            .map_err(storage_error)
    }

    async fn find(&self, id: DbId) -> Result<Option<Todo>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Into::into))
            .map_err(storage_error)
    }

    async fn update_text(&self, id: DbId, text: &str) -> Result<bool, CoreError> {
        let result = sqlx::query("UPDATE todos SET text = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(text)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(
        &self,
        username: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Todo>, CoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM todos
             WHERE username = $1
             ORDER BY id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(username)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(storage_error)
    }
}
