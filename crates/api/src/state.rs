use std::sync::Arc;

use luxrent_core::gate::SessionGate;

use crate::config::ServerConfig;
use crate::session_cookie::SessionCookies;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Validation and session lifecycle.
    pub gate: Arc<SessionGate>,
    /// Session id transport.
    pub cookies: Arc<SessionCookies>,
}

impl AppState {
    /// Wire the state from configuration and an already-built gate.
    pub fn new(config: ServerConfig, gate: Arc<SessionGate>) -> Self {
        let cookies = Arc::new(SessionCookies::new(&config.session));
        Self {
            config: Arc::new(config),
            gate,
            cookies,
        }
    }
}
