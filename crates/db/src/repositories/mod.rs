//! Repository layer.
//!
//! Each repository holds a pool handle and implements its store contract
//! from `tickbox_core::store`. SQL stays inside this module tree; callers
//! only ever see core domain types and [`CoreError`].

pub mod access_repo;
pub mod session_repo;
pub mod todo_repo;
pub mod user_repo;

pub use access_repo::AccessRepo;
pub use session_repo::SessionRepo;
pub use todo_repo::TodoRepo;
pub use user_repo::UserRepo;

use tickbox_core::error::CoreError;

/// Convert a sqlx error into the storage variant of the core taxonomy.
///
/// The driver message is kept for logging at the request boundary; it is
/// never echoed to clients.
pub(crate) fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::debug!(error = ?err, "Converting sqlx error to storage error");
    CoreError::Storage(err.to_string())
}
