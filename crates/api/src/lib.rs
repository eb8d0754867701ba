//! luxrent HTTP server library.
//!
//! Exposes the building blocks (config, state, error handling, session
//! transport, routes, router) so integration tests and the binary entrypoint
//! can both access them.

pub mod background;
pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod response;
pub mod router;
pub mod routes;
pub mod session_cookie;
pub mod state;
