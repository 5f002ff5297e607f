use crate::types::DbId;

/// Domain-level error taxonomy shared by the store contracts and services.
///
/// The HTTP status mapping lives in the api crate; this enum only fixes the
/// meaning of each failure class.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced record does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Client-supplied input failed validation. The message is safe to show
    /// to the client.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness guarantee would be violated (duplicate email/username).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request carries no usable authenticated session.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The session is authenticated but does not own the target record.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The per-session request window has not elapsed yet.
    #[error("Too many requests")]
    RateLimited,

    /// The backing store failed. The message describes the cause for logs;
    /// it must not be echoed to clients.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Any other unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
