//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`email_token`] -- signed, expiring email verification tokens.
//! - [`session_token`] -- HMAC-signed session cookie values.

pub mod email_token;
pub mod password;
pub mod session_token;
