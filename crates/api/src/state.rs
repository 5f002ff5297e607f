use std::sync::Arc;

use async_trait::async_trait;
use tickbox_core::store::{AccessStore, SessionStore, TodoStore, UserStore};

use crate::config::ServerConfig;
use crate::mailer::Mailer;

/// Backing-store reachability probe for the health endpoint.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// True when the underlying storage answers a liveness query.
    async fn db_healthy(&self) -> bool;
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Stores are trait
/// objects so integration tests can swap the PostgreSQL repositories for
/// in-memory fixtures.
#[derive(Clone)]
pub struct AppState {
    /// User account storage.
    pub users: Arc<dyn UserStore>,
    /// Session storage.
    pub sessions: Arc<dyn SessionStore>,
    /// Per-session request-window storage backing the rate limiter.
    pub access: Arc<dyn AccessStore>,
    /// Todo record storage.
    pub todos: Arc<dyn TodoStore>,
    /// Outbound mail delivery (verification links).
    pub mailer: Arc<dyn Mailer>,
    /// Storage reachability probe for `/health`.
    pub health: Arc<dyn HealthProbe>,
    /// Server configuration (signing secret, rate-limit interval, base URL).
    pub config: Arc<ServerConfig>,
}
