pub mod health;
pub mod pages;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// GET /session    -> current session (requires session)
/// GET /cars?q=    -> car catalogue (requires session)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(handlers::auth::current_session))
        .route("/cars", get(handlers::cars::list_cars))
}
