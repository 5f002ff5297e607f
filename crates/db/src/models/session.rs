//! Row struct for the `sessions` table.

use sqlx::FromRow;
use tickbox_core::session::{Session, SessionIdentity};
use tickbox_core::types::{DbId, SessionId, Timestamp};

/// A session row. The identity snapshot is stored denormalized so that
/// logout-from-all-devices can delete by username without a join.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: SessionId,
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub is_authenticated: bool,
    pub created_at: Timestamp,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            is_authenticated: row.is_authenticated,
            identity: SessionIdentity {
                user_id: row.user_id,
                username: row.username,
                email: row.email,
            },
            created_at: row.created_at,
        }
    }
}
