#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use luxrent_api::config::{ServerConfig, SessionConfig};
use luxrent_api::router::build_app_router;
use luxrent_api::state::AppState;
use luxrent_core::error::StoreError;
use luxrent_core::gate::SessionGate;
use luxrent_core::session::Session;
use luxrent_core::store::{InMemorySessionStore, SessionFilter, SessionStore};
use luxrent_core::types::{SessionId, Timestamp};

pub const COOKIE_NAME: &str = "luxrent_session";

/// Build a test `ServerConfig` with safe defaults and no session expiry.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "integration-test-secret-0123456789abcdef".to_string(),
            secure_cookie: false,
            cookie_name: COOKIE_NAME.to_string(),
            ttl_secs: None,
            idle_timeout_secs: None,
            sweep_interval_secs: 300,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (request ID, timeout, tracing, panic recovery) that
/// production uses.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config(), Arc::new(InMemorySessionStore::new()))
}

/// Build the router over a caller-supplied store and configuration.
pub fn build_test_app_with(config: ServerConfig, store: Arc<dyn SessionStore>) -> Router {
    let gate = Arc::new(SessionGate::new(store, config.session.policy()));
    build_app_router(AppState::new(config, gate))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a GET request, optionally carrying the session cookie.
pub async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, format!("{COOKIE_NAME}={cookie}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send an `application/x-www-form-urlencoded` POST.
pub async fn post_form(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();
    post_raw(
        app,
        uri,
        body,
        Some("application/x-www-form-urlencoded"),
        cookie,
    )
    .await
}

/// Send a POST with a verbatim body and an optional `Content-Type`.
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: impl Into<Body>,
    content_type: Option<&str>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, format!("{COOKIE_NAME}={cookie}"));
    }
    app.oneshot(builder.body(body.into()).unwrap())
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("response should be a redirect")
        .to_str()
        .unwrap()
        .to_string()
}

/// Full `Set-Cookie` header for the session cookie, if one was emitted.
pub fn session_set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{COOKIE_NAME}=")))
        .map(str::to_string)
}

/// Value of the session cookie set by `response`.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let header = session_set_cookie(response)?;
    let pair = header.split(';').next()?;
    let (_, value) = pair.split_once('=')?;
    Some(value.to_string()).filter(|v| !v.is_empty())
}

/// Log in through the HTTP surface and return the issued cookie value.
pub async fn login(app: Router, email: &str) -> String {
    let response = post_form(app, "/login", &[("email", email)], None).await;
    assert_eq!(location(&response), "/dashboard");
    session_cookie(&response).expect("login should set the session cookie")
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// A store whose every operation fails, standing in for an unreachable
/// backend.
pub struct UnavailableStore;

#[async_trait::async_trait]
impl SessionStore for UnavailableStore {
    async fn insert(&self, _session: Session) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn get(&self, _id: &SessionId) -> Result<Option<Session>, StoreError> {
        Err(unavailable())
    }

    async fn touch(&self, _id: &SessionId, _at: Timestamp) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn remove(&self, _id: &SessionId) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn purge(&self, _filter: SessionFilter<'_>) -> Result<usize, StoreError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Err(unavailable())
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}
