//! Todo records owned by a username.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// A stored todo item. `username` is the owning user; only the owner may
/// edit or delete the record.
#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: DbId,
    pub username: String,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a todo. The owner is always the session's username;
/// callers never choose it.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub username: String,
    pub text: String,
}
