//! In-memory store and mailer fixtures for integration tests.
//!
//! These implement the same contracts as the PostgreSQL repositories, backed
//! by mutex-guarded maps, so the full HTTP stack can be exercised without a
//! database. Locks are never held across an await point.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tickbox_api::mailer::{MailError, Mailer};
use tickbox_api::state::HealthProbe;
use tickbox_core::error::CoreError;
use tickbox_core::rate_limit::AdmitDecision;
use tickbox_core::session::Session;
use tickbox_core::store::{AccessStore, SessionStore, TodoStore, UserStore};
use tickbox_core::todo::{NewTodo, Todo};
use tickbox_core::types::{DbId, SessionId, Timestamp};
use tickbox_core::user::{NewUser, User};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUsers {
    next_id: AtomicI64,
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUsers {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError> {
        let mut rows = self.rows.lock().unwrap();

        // Same conflict messages the PostgreSQL constraints produce.
        if rows.iter().any(|u| u.email == input.email) {
            return Err(CoreError::Conflict("Email already exists".into()));
        }
        if rows.iter().any(|u| u.username == input.username) {
            return Err(CoreError::Conflict("Username already exists".into()));
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: input.username.clone(),
            email: input.email.clone(),
            display_name: input.display_name.clone(),
            password_hash: input.password_hash.clone(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.username == username).cloned())
    }

    async fn mark_verified(&self, email: &str) -> Result<(), CoreError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.email == email) {
            user.is_verified = true;
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemorySessions {
    rows: Mutex<HashMap<SessionId, Session>>,
}

impl InMemorySessions {
    /// Number of live sessions; used to assert logout behaviour.
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessions {
    async fn create(&self, session: &Session) -> Result<(), CoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.insert(session.id, session.clone());
        Ok(())
    }

    async fn find(&self, id: SessionId) -> Result<Option<Session>, CoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&id).cloned())
    }

    async fn delete(&self, id: SessionId) -> Result<(), CoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.remove(&id);
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> Result<u64, CoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|_, session| session.identity.username != username);
        Ok((before - rows.len()) as u64)
    }
}

// ---------------------------------------------------------------------------
// Access windows
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryAccess {
    windows: Mutex<HashMap<SessionId, Timestamp>>,
}

#[async_trait]
impl AccessStore for InMemoryAccess {
    async fn admit(
        &self,
        session_id: SessionId,
        min_interval: Duration,
    ) -> Result<AdmitDecision, CoreError> {
        // One lock for the whole check-and-update keeps concurrent admits
        // from sharing a slot, matching the single-statement SQL version.
        let mut windows = self.windows.lock().unwrap();
        let now = Utc::now();

        match windows.get(&session_id) {
            None => {
                windows.insert(session_id, now);
                Ok(AdmitDecision::Allow)
            }
            Some(last) => {
                let elapsed = (now - *last).to_std().unwrap_or(Duration::ZERO);
                if elapsed >= min_interval {
                    windows.insert(session_id, now);
                    Ok(AdmitDecision::Allow)
                } else {
                    // Denials leave the stored timestamp untouched.
                    Ok(AdmitDecision::Deny)
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryTodos {
    next_id: AtomicI64,
    rows: Mutex<Vec<Todo>>,
}

#[async_trait]
impl TodoStore for InMemoryTodos {
    async fn insert(&self, input: &NewTodo) -> Result<Todo, CoreError> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let todo = Todo {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: input.username.clone(),
            text: input.text.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(todo.clone());
        Ok(todo)
    }

    async fn find(&self, id: DbId) -> Result<Option<Todo>, CoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|t| t.id == id).cloned())
    }

    async fn update_text(&self, id: DbId, text: &str) -> Result<bool, CoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.text = text.to_string();
                todo.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }

    async fn list_by_owner(
        &self,
        username: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Todo>, CoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|t| t.username == username)
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Captures outbound verification mail instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    /// Snapshot of `(recipient, verify_url)` pairs sent so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Make every subsequent delivery fail, recording nothing.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification(&self, to: &str, verify_url: &str) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Build("mail transport unavailable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), verify_url.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Health probe with a fixed answer.
pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthProbe for StaticHealth {
    async fn db_healthy(&self) -> bool {
        self.0
    }
}
