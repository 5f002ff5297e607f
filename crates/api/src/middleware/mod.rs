//! Authentication and rate-limiting middleware.
//!
//! - [`session::SessionUser`] -- Extracts the authenticated user from the signed session cookie.
//! - [`rate_limit::require_write_slot`] -- Throttles todo writes per session.

pub mod rate_limit;
pub mod session;
