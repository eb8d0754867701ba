//! Request extractors guarding session-protected routes.
//!
//! - [`auth::SessionToken`] -- The (possibly absent) session id carried by the request.
//! - [`auth::AuthSession`] -- Requires a live session; rejects with a JSON 401.
//! - [`auth::PageSession`] -- Requires a live session; rejects with a redirect to `/`.

pub mod auth;
