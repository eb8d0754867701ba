//! Session-cookie extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use luxrent_core::session::Session;
use luxrent_core::types::SessionId;

use crate::error::AppError;
use crate::flash;
use crate::state::AppState;

/// Session id presented by the client, if the cookie is present and its
/// signature checks out. Never rejects.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<SessionId>);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(SessionToken(state.cookies.read(&jar)))
    }
}

/// Live session for JSON endpoints.
///
/// ```ignore
/// async fn my_handler(AuthSession(session): AuthSession) -> AppResult<Json<()>> {
///     tracing::info!(display_name = %session.display_name, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(id) = SessionToken::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let session = state.gate.require_session(id.as_ref()).await?;
        Ok(AuthSession(session))
    }
}

/// Live session for HTML pages. Anonymous visitors are sent back to the
/// entry page with an explanation instead of seeing protected content.
#[derive(Debug, Clone)]
pub struct PageSession(pub Session);

impl FromRequestParts<AppState> for PageSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(id) = SessionToken::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        match state.gate.require_session(id.as_ref()).await {
            Ok(session) => Ok(PageSession(session)),
            Err(e) => {
                tracing::debug!(path = %parts.uri.path(), "Protected page requested without session");
                Err(flash::redirect_error(
                    "/",
                    flash::describe(&e, flash::LOGIN_REQUIRED),
                ))
            }
        }
    }
}
