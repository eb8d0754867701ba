//! Session storage abstraction.
//!
//! The gate only talks to [`SessionStore`]; [`InMemorySessionStore`] is the
//! bundled backing. Another backing (an external cache, say) plugs in by
//! implementing the trait and is injected as `Arc<dyn SessionStore>`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::session::Session;
use crate::types::{SessionId, Timestamp};

/// Predicate used by [`SessionStore::purge`].
pub type SessionFilter<'a> = &'a (dyn Fn(&Session) -> bool + Send + Sync);

/// Mapping from [`SessionId`] to [`Session`] record.
///
/// Implementations must give read-your-writes consistency per id: a session
/// inserted by one request is visible to the very next request bearing its id.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Insert or replace the record under `session.id`.
    async fn insert(&self, session: Session) -> Result<(), StoreError>;

    /// Fetch a copy of the record, if any.
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, StoreError>;

    /// Set `last_seen_at`. Returns `false` when the id is unknown.
    async fn touch(&self, id: &SessionId, at: Timestamp) -> Result<bool, StoreError>;

    /// Delete the record. Returns whether something was removed.
    async fn remove(&self, id: &SessionId) -> Result<bool, StoreError>;

    /// Delete every record matching `filter`; returns how many went.
    async fn purge(&self, filter: SessionFilter<'_>) -> Result<usize, StoreError>;

    /// Number of records currently held.
    async fn count(&self) -> Result<usize, StoreError>;
}

/// Process-local store behind a `tokio` [`RwLock`].
///
/// Every mutation takes the write lock, so concurrent login/logout races on
/// the same id are serialized and cannot lose updates.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn touch(&self, id: &SessionId, at: Timestamp) -> Result<bool, StoreError> {
        match self.sessions.write().await.get_mut(id) {
            Some(session) => {
                session.last_seen_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn purge(&self, filter: SessionFilter<'_>) -> Result<usize, StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !filter(session));
        Ok(before - sessions.len())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.read().await.len())
    }
}
