//! Request handlers.
//!
//! - [`auth`] -- Form submissions that open and close sessions.
//! - [`pages`] -- HTML pages, including the protected dashboard.
//! - [`cars`] -- JSON car catalogue for signed-in visitors.

pub mod auth;
pub mod cars;
pub mod pages;
