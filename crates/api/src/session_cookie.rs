//! Cookie transport for session ids.
//!
//! The cookie value is `<session id>.<hex HMAC-SHA256(secret, session id)>`.
//! Values that are unsigned, tampered with, or malformed are treated exactly
//! like an absent cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hmac::{Hmac, Mac};
use luxrent_core::types::SessionId;
use sha2::Sha256;

use crate::config::SessionConfig;

type HmacSha256 = Hmac<Sha256>;

/// Issues, reads and clears the session cookie.
#[derive(Clone)]
pub struct SessionCookies {
    key: Vec<u8>,
    name: String,
    secure: bool,
    max_age_secs: Option<u64>,
}

impl SessionCookies {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            key: config.secret.as_bytes().to_vec(),
            name: config.cookie_name.clone(),
            secure: config.secure_cookie,
            max_age_secs: config.ttl_secs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signed cookie value for `id`.
    pub fn sign(&self, id: &SessionId) -> String {
        let tag = self.mac(id.as_str()).finalize().into_bytes();
        format!("{}.{}", id.as_str(), hex::encode(tag))
    }

    /// Recover the session id from a signed value, checking the tag in
    /// constant time.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (raw_id, raw_tag) = value.split_once('.')?;
        let id = SessionId::parse(raw_id)?;
        let tag = hex::decode(raw_tag).ok()?;
        self.mac(id.as_str()).verify_slice(&tag).ok()?;
        Some(id)
    }

    /// Session id carried by the request, if any and if authentic.
    pub fn read(&self, jar: &CookieJar) -> Option<SessionId> {
        let cookie = jar.get(&self.name)?;
        let id = self.verify(cookie.value());
        if id.is_none() {
            tracing::debug!(cookie = %self.name, "Ignoring session cookie with bad signature");
        }
        id
    }

    /// Add the cookie for `id` to the jar.
    pub fn issue(&self, jar: CookieJar, id: &SessionId) -> CookieJar {
        let mut cookie = Cookie::build((self.name.clone(), self.sign(id)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        if let Some(secs) = self.max_age_secs {
            cookie.set_max_age(time::Duration::seconds(
                i64::try_from(secs).unwrap_or(i64::MAX),
            ));
        }
        jar.add(cookie)
    }

    /// Replace the cookie with an expired removal cookie.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(self.name.clone()).path("/"))
    }

    fn mac(&self, message: &str) -> HmacSha256 {
        let mut mac =
            <HmacSha256 as Mac>::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(message.as_bytes());
        mac
    }
}
