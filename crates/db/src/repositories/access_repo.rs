//! Repository for the `access_windows` table (rate-limit bookkeeping).

use std::time::Duration;

use async_trait::async_trait;
use tickbox_core::error::CoreError;
use tickbox_core::rate_limit::AdmitDecision;
use tickbox_core::store::AccessStore;
use tickbox_core::types::SessionId;

use crate::repositories::storage_error;
use crate::DbPool;

/// PostgreSQL-backed [`AccessStore`].
///
/// The admit check must be atomic per session: two concurrent requests
/// arriving after the window has elapsed must not both read the old
/// timestamp and both pass. Each step below is a single statement, so
/// PostgreSQL's row-level locking serializes racing calls.
pub struct AccessRepo {
    pool: DbPool,
}

impl AccessRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessStore for AccessRepo {
    async fn admit(
        &self,
        session_id: SessionId,
        min_interval: Duration,
    ) -> Result<AdmitDecision, CoreError> {
        // 1. Tracked session with an elapsed window: advance the timestamp.
        //    Check and update are one conditional statement.
        let updated = sqlx::query(
            "UPDATE access_windows
             SET last_request_at = NOW()
             WHERE session_id = $1
               AND last_request_at <= NOW() - ($2 * INTERVAL '1 second')",
        )
        .bind(session_id)
        .bind(min_interval.as_secs_f64())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if updated.rows_affected() > 0 {
            return Ok(AdmitDecision::Allow);
        }

        // 2. Unseen session: exactly one concurrent inserter wins the row;
        //    the loser falls through to Deny.
        let inserted = sqlx::query(
            "INSERT INTO access_windows (session_id, last_request_at)
             VALUES ($1, NOW())
             ON CONFLICT (session_id) DO NOTHING",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if inserted.rows_affected() > 0 {
            Ok(AdmitDecision::Allow)
        } else {
            // 3. Tracked session still inside the window: deny, leaving the
            //    stored timestamp untouched.
            Ok(AdmitDecision::Deny)
        }
    }
}
