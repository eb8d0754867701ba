//! Handlers rendering the HTML pages.

use axum::extract::Query;
use axum::response::Html;
use luxrent_core::catalogue;

use crate::flash::Flash;
use crate::middleware::auth::PageSession;
use crate::pages;

/// GET /
pub async fn index(Query(flash): Query<Flash>) -> Html<String> {
    Html(pages::login_page(&flash))
}

/// GET /register
pub async fn register_form(Query(flash): Query<Flash>) -> Html<String> {
    Html(pages::register_page(&flash))
}

/// GET /dashboard
///
/// Protected: anonymous visitors are redirected by [`PageSession`].
pub async fn dashboard(
    PageSession(session): PageSession,
    Query(flash): Query<Flash>,
) -> Html<String> {
    Html(pages::dashboard_page(&session, catalogue::all(), &flash))
}
