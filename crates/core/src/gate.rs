//! The Session Gate: form validation plus session lifecycle.
//!
//! ```text
//! Anonymous --login/register ok--> Authenticated
//! Authenticated --logout/expiry--> Anonymous
//! Anonymous --validation error--> Anonymous (error returned to caller)
//! ```
//!
//! A "request context" is represented by the optional [`SessionId`] the
//! request carried. The gate never sees cookies or HTTP; the transport layer
//! turns whatever the client sent into that option.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::session::{Session, SessionPolicy};
use crate::store::SessionStore;
use crate::types::SessionId;
use crate::validation::{local_part, require_field, validate_email, validate_email_format};

pub struct SessionGate {
    store: Arc<dyn SessionStore>,
    policy: SessionPolicy,
}

impl SessionGate {
    pub fn new(store: Arc<dyn SessionStore>, policy: SessionPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Validate a login submission and open a session for it.
    ///
    /// The display name is the part of `email` before the first `@`. A
    /// session already attached to the request context (`current`) is
    /// destroyed first, so the new one replaces it rather than merging.
    pub async fn login(
        &self,
        email: Option<&str>,
        current: Option<&SessionId>,
    ) -> CoreResult<Session> {
        let email = validate_email(email).inspect_err(|e| {
            tracing::debug!(reason = %e, "Login rejected");
        })?;

        let session = Session::new(email, local_part(email), Utc::now());
        self.establish(session, current).await
    }

    /// Validate a registration submission and open a session for it.
    ///
    /// Both fields are checked for presence before the email format is
    /// looked at. The display name is `name` verbatim. There is no account
    /// table, so registering the same email twice simply opens another
    /// session.
    pub async fn register(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        current: Option<&SessionId>,
    ) -> CoreResult<Session> {
        let (name, email) = match (require_field(name), require_field(email)) {
            (Ok(name), Ok(email)) => (name, email),
            _ => {
                tracing::debug!(reason = %ValidationError::MissingField, "Registration rejected");
                return Err(ValidationError::MissingField.into());
            }
        };
        validate_email_format(email).inspect_err(|e| {
            tracing::debug!(reason = %e, "Registration rejected");
        })?;

        let session = Session::new(email, name, Utc::now());
        self.establish(session, current).await
    }

    /// Resolve the request's session, or fail with [`CoreError::Unauthenticated`].
    ///
    /// Expired records are deleted when encountered. A successful check
    /// refreshes the session's idle clock.
    pub async fn require_session(&self, id: Option<&SessionId>) -> CoreResult<Session> {
        let Some(id) = id else {
            return Err(CoreError::Unauthenticated);
        };
        let Some(mut session) = self.store.get(id).await? else {
            tracing::debug!("Unknown session id presented");
            return Err(CoreError::Unauthenticated);
        };

        let now = Utc::now();
        if session.is_expired(&self.policy, now) {
            self.store.remove(id).await?;
            tracing::info!(display_name = %session.display_name, "Session expired");
            return Err(CoreError::Unauthenticated);
        }

        // Losing the race against a concurrent logout means the session is gone.
        if !self.store.touch(id, now).await? {
            return Err(CoreError::Unauthenticated);
        }
        session.last_seen_at = now;
        Ok(session)
    }

    /// Destroy the request's session. Idempotent.
    pub async fn logout(&self, id: Option<&SessionId>) -> CoreResult<()> {
        if let Some(id) = id {
            if self.store.remove(id).await? {
                tracing::info!("Session destroyed");
            }
        }
        Ok(())
    }

    /// Remove every session that has outlived the policy.
    pub async fn purge_expired(&self) -> CoreResult<usize> {
        let policy = self.policy;
        let now = Utc::now();
        let purged = self
            .store
            .purge(&|session: &Session| session.is_expired(&policy, now))
            .await?;
        Ok(purged)
    }

    /// Number of sessions currently held by the store.
    pub async fn active_sessions(&self) -> CoreResult<usize> {
        Ok(self.store.count().await?)
    }

    async fn establish(&self, session: Session, current: Option<&SessionId>) -> CoreResult<Session> {
        if let Some(previous) = current {
            self.store.remove(previous).await?;
        }
        self.store.insert(session.clone()).await?;
        tracing::info!(display_name = %session.display_name, "Session created");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;
    use crate::store::InMemorySessionStore;

    fn gate() -> SessionGate {
        gate_with(SessionPolicy::default())
    }

    fn gate_with(policy: SessionPolicy) -> SessionGate {
        SessionGate::new(Arc::new(InMemorySessionStore::new()), policy)
    }

    #[tokio::test]
    async fn login_derives_display_name_from_local_part() {
        let gate = gate();

        let session = gate.login(Some("alice@example.com"), None).await.unwrap();

        assert_eq!(session.display_name, "alice");
        assert_eq!(session.email, "alice@example.com");
        let found = gate.require_session(Some(&session.id)).await.unwrap();
        assert_eq!(found.display_name, "alice");
    }

    #[tokio::test]
    async fn login_with_missing_email_creates_nothing() {
        let gate = gate();

        for email in [None, Some(""), Some("   ")] {
            assert_matches!(
                gate.login(email, None).await,
                Err(CoreError::Validation(ValidationError::MissingField))
            );
        }
        assert_eq!(gate.active_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn login_with_bad_format_creates_nothing() {
        let gate = gate();

        assert_matches!(
            gate.login(Some("not-an-email"), None).await,
            Err(CoreError::Validation(ValidationError::InvalidFormat))
        );
        assert_eq!(gate.active_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn register_keeps_name_verbatim() {
        let gate = gate();

        let session = gate
            .register(Some("Bob Smith"), Some("bob@example.com"), None)
            .await
            .unwrap();

        assert_eq!(session.display_name, "Bob Smith");
        assert!(gate.require_session(Some(&session.id)).await.is_ok());
    }

    #[tokio::test]
    async fn register_reports_missing_before_format() {
        let gate = gate();

        assert_matches!(
            gate.register(None, Some("bad"), None).await,
            Err(CoreError::Validation(ValidationError::MissingField))
        );
        assert_matches!(
            gate.register(Some("Bob"), Some(" "), None).await,
            Err(CoreError::Validation(ValidationError::MissingField))
        );
        assert_matches!(
            gate.register(Some("Bob"), Some("bob@example"), None).await,
            Err(CoreError::Validation(ValidationError::InvalidFormat))
        );
        assert_eq!(gate.active_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_registration_opens_independent_sessions() {
        let gate = gate();

        let first = gate
            .register(Some("Bob"), Some("bob@example.com"), None)
            .await
            .unwrap();
        let second = gate
            .register(Some("Bob"), Some("bob@example.com"), None)
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(gate.active_sessions().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn new_login_replaces_current_session() {
        let gate = gate();
        let first = gate.login(Some("alice@example.com"), None).await.unwrap();

        let second = gate
            .login(Some("carol@example.com"), Some(&first.id))
            .await
            .unwrap();

        assert_matches!(
            gate.require_session(Some(&first.id)).await,
            Err(CoreError::Unauthenticated)
        );
        assert_eq!(
            gate.require_session(Some(&second.id)).await.unwrap().display_name,
            "carol"
        );
        assert_eq!(gate.active_sessions().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn require_session_without_login_is_unauthenticated() {
        let gate = gate();

        assert_matches!(gate.require_session(None).await, Err(CoreError::Unauthenticated));
        assert_matches!(
            gate.require_session(Some(&SessionId::generate())).await,
            Err(CoreError::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn logout_then_require_session_is_unauthenticated() {
        let gate = gate();
        let session = gate.login(Some("alice@example.com"), None).await.unwrap();

        gate.logout(Some(&session.id)).await.unwrap();

        assert_matches!(
            gate.require_session(Some(&session.id)).await,
            Err(CoreError::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let gate = gate();
        let session = gate.login(Some("alice@example.com"), None).await.unwrap();

        gate.logout(Some(&session.id)).await.unwrap();
        gate.logout(Some(&session.id)).await.unwrap();
        gate.logout(None).await.unwrap();
    }

    #[tokio::test]
    async fn expired_session_is_removed_on_access() {
        let gate = gate_with(SessionPolicy {
            ttl: Some(Duration::ZERO),
            idle_timeout: None,
        });
        let session = gate.login(Some("alice@example.com"), None).await.unwrap();

        assert_matches!(
            gate.require_session(Some(&session.id)).await,
            Err(CoreError::Unauthenticated)
        );
        assert_eq!(gate.active_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn purge_expired_sweeps_stale_sessions() {
        let gate = gate_with(SessionPolicy {
            ttl: None,
            idle_timeout: Some(Duration::ZERO),
        });
        gate.login(Some("alice@example.com"), None).await.unwrap();
        gate.login(Some("bob@example.com"), None).await.unwrap();

        assert_eq!(gate.purge_expired().await.unwrap(), 2);
        assert_eq!(gate.active_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn purge_expired_keeps_sessions_without_policy() {
        let gate = gate();
        gate.login(Some("alice@example.com"), None).await.unwrap();

        assert_eq!(gate.purge_expired().await.unwrap(), 0);
        assert_eq!(gate.active_sessions().await.unwrap(), 1);
    }
}
