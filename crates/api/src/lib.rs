//! Duet HTTP API.
//!
//! Exposes the application modules so the binary (`main.rs`) and the
//! integration tests under `tests/` build the exact same router.

pub mod auth;
pub mod body;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
