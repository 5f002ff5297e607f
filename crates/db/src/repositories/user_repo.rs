//! Repository for the `users` table.

use async_trait::async_trait;
use tickbox_core::error::CoreError;
use tickbox_core::store::UserStore;
use tickbox_core::user::{NewUser, User};

use crate::models::user::UserRow;
use crate::repositories::storage_error;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, email, display_name, password_hash, is_verified, created_at, updated_at";

/// PostgreSQL-backed [`UserStore`].
pub struct UserRepo {
    pool: DbPool,
}

impl UserRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError> {
        let query = format!(
            "INSERT INTO users (username, email, display_name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.display_name)
            .bind(&input.password_hash)
            .fetch_one(&self.pool)
            .await
            .map(Into::into)
            .map_err(classify_insert_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Into::into))
            .map_err(storage_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Into::into))
            .map_err(storage_error)
    }

    async fn mark_verified(&self, email: &str) -> Result<(), CoreError> {
        // Zero affected rows is fine: verification is idempotent and an
        // unknown email is not an error at this layer.
        sqlx::query("UPDATE users SET is_verified = TRUE, updated_at = NOW() WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

/// Map a failed insert to [`CoreError::Conflict`] when a `uq_` constraint
/// was violated (PostgreSQL error code 23505), otherwise to Storage.
fn classify_insert_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("uq_users_email") => CoreError::Conflict("Email already exists".to_string()),
                Some("uq_users_username") => {
                    CoreError::Conflict("Username already exists".to_string())
                }
                other => CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {}",
                    other.unwrap_or("unknown")
                )),
            };
        }
    }
    storage_error(err)
}
