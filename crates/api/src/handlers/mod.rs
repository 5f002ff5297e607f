//! Request handlers for the account and todo resources.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! delegate to the storage contracts on [`AppState`](crate::state::AppState)
//! and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod todos;
