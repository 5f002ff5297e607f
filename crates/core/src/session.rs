//! Server-side session records.

use crate::types::{DbId, SessionId, Timestamp};

/// Identity snapshot embedded in a session at login time.
///
/// The snapshot is never refreshed from the user directory mid-session; a
/// session carries whatever was true when it was established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
}

/// A server-side session. The client holds only the signed form of `id`.
///
/// `is_authenticated` being true is the sole basis for treating a request as
/// authenticated; protected handlers never re-check the user directory.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub is_authenticated: bool,
    pub identity: SessionIdentity,
    pub created_at: Timestamp,
}

impl Session {
    /// Establish a fresh authenticated session for the given identity.
    pub fn establish(identity: SessionIdentity) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            is_authenticated: true,
            identity,
            created_at: chrono::Utc::now(),
        }
    }
}
