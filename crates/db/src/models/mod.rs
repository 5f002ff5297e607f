//! Row structs mirroring the database schema.
//!
//! Each submodule contains a `FromRow` struct matching its table plus the
//! conversion into the corresponding `tickbox_core` domain type. Conversion
//! happens at the repository boundary; nothing above the db crate sees a
//! row struct.

pub mod session;
pub mod todo;
pub mod user;
