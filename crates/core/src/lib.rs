//! Domain types, validation, and storage contracts for the tickbox service.
//!
//! This crate is persistence-agnostic: the HTTP layer and the PostgreSQL
//! repositories both depend on it, never the other way around. The store
//! traits in [`store`] are the seam between the two.

pub mod error;
pub mod rate_limit;
pub mod session;
pub mod store;
pub mod todo;
pub mod types;
pub mod user;
pub mod validation;
