use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use luxrent_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub timestamp: Timestamp,
    /// Sessions held by the store, or `null` if the store is unreachable.
    pub active_sessions: Option<usize>,
}

/// GET /health -- returns liveness and session store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let active_sessions = match state.gate.active_sessions().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the session store");
            None
        }
    };

    let status = if active_sessions.is_some() { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        active_sessions,
    })
}

/// Mount health check routes (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
