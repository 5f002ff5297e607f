//! Repository for the `sessions` table.

use async_trait::async_trait;
use tickbox_core::error::CoreError;
use tickbox_core::session::Session;
use tickbox_core::store::SessionStore;
use tickbox_core::types::SessionId;

use crate::models::session::SessionRow;
use crate::repositories::storage_error;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, username, email, is_authenticated, created_at";

/// PostgreSQL-backed [`SessionStore`].
pub struct SessionRepo {
    pool: DbPool,
}

impl SessionRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepo {
    async fn create(&self, session: &Session) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, username, email, is_authenticated, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(session.id)
        .bind(session.identity.user_id)
        .bind(&session.identity.username)
        .bind(&session.identity.email)
        .bind(session.is_authenticated)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }

    async fn find(&self, id: SessionId) -> Result<Option<Session>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Into::into))
            .map_err(storage_error)
    }

    async fn delete(&self, id: SessionId) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> Result<u64, CoreError> {
        // Secondary lookup on the denormalized username, backed by
        // idx_sessions_username.
        let result = sqlx::query("DELETE FROM sessions WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected())
    }
}
