/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Opaque session identifiers. Generated server-side as UUID v4; the client
/// only ever sees the signed form produced by the api crate.
pub type SessionId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
