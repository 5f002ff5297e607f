//! Admission policy for the per-session request gate.

use std::time::Duration;

/// Default minimum interval between admitted requests for one session.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(5);

/// Outcome of a rate-limit admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitDecision {
    /// The request proceeds; the session's window timestamp was advanced.
    Allow,
    /// The request is rejected. The window timestamp is left untouched, so
    /// repeated attempts cannot push the window further out.
    Deny,
}

impl AdmitDecision {
    /// True for [`AdmitDecision::Allow`].
    pub fn is_allowed(self) -> bool {
        matches!(self, AdmitDecision::Allow)
    }
}
