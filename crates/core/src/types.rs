use std::fmt;

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Number of random bytes behind a [`SessionId`].
const SESSION_ID_BYTES: usize = 32;

/// Opaque, unguessable session identifier.
///
/// Rendered as a 64-character lowercase hex string. Only the server ever maps
/// an id back to a [`Session`](crate::session::Session); clients hold the id
/// and nothing else.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh identifier from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let bytes: [u8; SESSION_ID_BYTES] = rand::random();
        Self(hex::encode(bytes))
    }

    /// Parse an identifier received from a client.
    ///
    /// Returns `None` unless the value has the exact shape produced by
    /// [`SessionId::generate`].
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == SESSION_ID_BYTES * 2
            && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Ids are bearer secrets; keep them out of debug output and logs.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({}..)", &self.0[..8.min(self.0.len())])
    }
}
