//! The session record and its expiry policy.

use std::time::Duration;

use serde::Serialize;

use crate::types::{SessionId, Timestamp};

/// Server-held record tying an opaque id to an authenticated visitor.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(skip)]
    pub id: SessionId,
    pub email: String,
    /// Registration name verbatim, or the email's local part after login.
    pub display_name: String,
    pub created_at: Timestamp,
    /// Last time the session passed the guard; drives idle expiry.
    pub last_seen_at: Timestamp,
}

impl Session {
    /// Build a fresh session with a newly generated id.
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: SessionId::generate(),
            email: email.into(),
            display_name: display_name.into(),
            created_at: now,
            last_seen_at: now,
        }
    }

    /// Whether this session has outlived `policy` at instant `now`.
    pub fn is_expired(&self, policy: &SessionPolicy, now: Timestamp) -> bool {
        let outlived = |since: Timestamp, limit: Option<Duration>| {
            limit.is_some_and(|limit| {
                // A limit too large for chrono never elapses.
                chrono::Duration::from_std(limit)
                    .map(|limit| now - since >= limit)
                    .unwrap_or(false)
            })
        };

        outlived(self.created_at, policy.ttl) || outlived(self.last_seen_at, policy.idle_timeout)
    }
}

/// Expiry rules applied by the gate and the background sweeper.
///
/// The default has no limits at all: a session lives until logout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Absolute lifetime measured from creation.
    pub ttl: Option<Duration>,
    /// Maximum gap between two guarded requests.
    pub idle_timeout: Option<Duration>,
}

impl SessionPolicy {
    /// Whether any session can ever expire under this policy.
    pub fn has_limits(&self) -> bool {
        self.ttl.is_some() || self.idle_timeout.is_some()
    }
}
