//! Route definitions for the browser-facing pages and forms.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, pages};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET  /           -> login page
/// GET  /register   -> registration page
/// POST /login      -> open session, redirect to /dashboard
/// POST /register   -> open session, redirect to /dashboard
/// GET  /dashboard  -> dashboard (requires session)
/// GET  /logout     -> close session, redirect to /
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/register", get(pages::register_form).post(auth::register))
        .route("/login", post(auth::login))
        .route("/dashboard", get(pages::dashboard))
        .route("/logout", get(auth::logout))
}
