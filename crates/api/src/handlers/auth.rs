//! Handlers for login, registration, logout and the current session.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::Redirect;
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use luxrent_core::session::Session;
use serde::Deserialize;

use crate::error::AppResult;
use crate::flash;
use crate::middleware::auth::{AuthSession, SessionToken};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
}

/// Form body for `POST /register`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /login
///
/// Opens a session for a well-formed email and redirects to the dashboard.
/// Validation failures, and bodies that are not a valid form at all,
/// redirect back to `/` with an `error` message.
pub async fn login(
    State(state): State<AppState>,
    SessionToken(current): SessionToken,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed login form");
            return (jar, flash::redirect_error("/", flash::EMAIL_REQUIRED));
        }
    };

    match state
        .gate
        .login(input.email.as_deref(), current.as_ref())
        .await
    {
        Ok(session) => (
            state.cookies.issue(jar, &session.id),
            Redirect::to("/dashboard"),
        ),
        Err(e) => (
            jar,
            flash::redirect_error("/", flash::describe(&e, flash::EMAIL_REQUIRED)),
        ),
    }
}

/// POST /register
///
/// Opens a session named after the submitted `name` and redirects to the
/// dashboard with a success message. Failures go back to `/register`.
pub async fn register(
    State(state): State<AppState>,
    SessionToken(current): SessionToken,
    jar: CookieJar,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed registration form");
            return (
                jar,
                flash::redirect_error("/register", flash::NAME_AND_EMAIL_REQUIRED),
            );
        }
    };

    match state
        .gate
        .register(
            input.name.as_deref(),
            input.email.as_deref(),
            current.as_ref(),
        )
        .await
    {
        Ok(session) => (
            state.cookies.issue(jar, &session.id),
            flash::redirect_success("/dashboard", flash::ACCOUNT_CREATED),
        ),
        Err(e) => (
            jar,
            flash::redirect_error(
                "/register",
                flash::describe(&e, flash::NAME_AND_EMAIL_REQUIRED),
            ),
        ),
    }
}

/// GET /logout
///
/// Destroys the session, if any, and clears the cookie. Always succeeds.
pub async fn logout(
    State(state): State<AppState>,
    SessionToken(current): SessionToken,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Err(e) = state.gate.logout(current.as_ref()).await {
        // The cookie is cleared regardless, so the visitor is signed out
        // from their side even if the record lingers until it expires.
        tracing::error!(error = %e, "Failed to destroy session on logout");
    }
    (
        state.cookies.clear(jar),
        flash::redirect_success("/", flash::LOGGED_OUT),
    )
}

/// GET /api/v1/session
///
/// The signed-in visitor's session record.
pub async fn current_session(
    AuthSession(session): AuthSession,
) -> AppResult<Json<DataResponse<Session>>> {
    Ok(Json(DataResponse { data: session }))
}
