//! User records and the input shape for creating them.

use crate::types::{DbId, Timestamp};

/// A full user record.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Handlers expose identity fields individually instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    /// Argon2id hash in PHC string format.
    pub password_hash: String,
    /// False until the verification link for this email has been followed.
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a user. The password arrives here already hashed;
/// plaintext never crosses the store boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}
