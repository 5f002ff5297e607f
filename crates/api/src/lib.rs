//! Tickbox API server library.
//!
//! Exposes the building blocks of the HTTP layer (router construction,
//! application state, configuration) so integration tests and the binary
//! entrypoint can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::AppError;
pub use state::AppState;
