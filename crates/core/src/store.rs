//! Storage contracts implemented by the db crate (PostgreSQL) and by the
//! in-memory fixtures in the api crate's integration tests.
//!
//! Every method returns [`CoreError`]; infrastructure failures arrive as
//! [`CoreError::Storage`] so callers never see driver types.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::rate_limit::AdmitDecision;
use crate::session::Session;
use crate::todo::{NewTodo, Todo};
use crate::types::{DbId, SessionId};
use crate::user::{NewUser, User};

/// Persistence contract for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, returning the stored record.
    ///
    /// Uniqueness of email and username is enforced by the store itself;
    /// violations surface as [`CoreError::Conflict`], so there is no
    /// check-then-insert race for callers to worry about.
    async fn create(&self, input: &NewUser) -> Result<User, CoreError>;

    /// Look up a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    /// Look up a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CoreError>;

    /// Set the verification flag for the given email.
    ///
    /// Idempotent: re-verifying an already-verified (or unknown) email is
    /// not an error.
    async fn mark_verified(&self, email: &str) -> Result<(), CoreError>;
}

/// Persistence contract for sessions.
///
/// Besides plain by-id access, the contract requires a secondary lookup on
/// the username embedded in the session payload; "logout from all devices"
/// depends on it, so a plain key-value store is not enough.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a freshly established session.
    async fn create(&self, session: &Session) -> Result<(), CoreError>;

    /// Fetch a session by id.
    async fn find(&self, id: SessionId) -> Result<Option<Session>, CoreError>;

    /// Destroy a single session. Unknown ids are not an error.
    async fn delete(&self, id: SessionId) -> Result<(), CoreError>;

    /// Destroy every session whose identity snapshot carries `username`,
    /// returning how many were destroyed.
    async fn delete_by_username(&self, username: &str) -> Result<u64, CoreError>;
}

/// Persistence contract for the per-session rate-limit window.
#[async_trait]
pub trait AccessStore: Send + Sync {
    /// Admit or deny a request for `session_id` under a minimum-interval
    /// policy.
    ///
    /// The first request for a session is always allowed and starts the
    /// window. A later request is allowed only when at least `min_interval`
    /// has elapsed since the last allowed one; denials leave the stored
    /// timestamp untouched. Implementations must make the check-and-update
    /// atomic: two concurrent calls arriving after the window must never
    /// both be allowed.
    async fn admit(
        &self,
        session_id: SessionId,
        min_interval: Duration,
    ) -> Result<AdmitDecision, CoreError>;
}

/// Persistence contract for todo records.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a new todo, returning the stored record.
    async fn insert(&self, input: &NewTodo) -> Result<Todo, CoreError>;

    /// Fetch a todo by id.
    async fn find(&self, id: DbId) -> Result<Option<Todo>, CoreError>;

    /// Replace the text of an existing todo. Returns `false` when the row
    /// no longer exists.
    async fn update_text(&self, id: DbId, text: &str) -> Result<bool, CoreError>;

    /// Delete a todo. Returns `false` when the row no longer exists.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    /// List todos owned by `username` in creation order (ascending id),
    /// windowed by `skip`/`limit`.
    async fn list_by_owner(
        &self,
        username: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Todo>, CoreError>;
}
