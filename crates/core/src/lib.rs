//! Domain layer for the luxrent demo service.
//!
//! Everything here is free of HTTP concerns: input validation, the session
//! record and its expiry policy, the session store abstraction, the
//! [`gate::SessionGate`] that ties them together, and the static car
//! catalogue shown on the dashboard.

pub mod catalogue;
pub mod error;
pub mod gate;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;
