//! Argon2id hashing for stored credentials.
//!
//! Registration hashes the plaintext once and stores the PHC string on the
//! user record; login re-verifies the submitted password against that
//! string. Every hash gets a fresh [`OsRng`] salt, and the PHC format keeps
//! the algorithm parameters embedded alongside it.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hashed.to_string())
}

/// Check a submitted password against the stored PHC string.
///
/// A mismatch is `Ok(false)`, not an error; `Err` means the stored string
/// could not be parsed or the hasher itself failed.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}
