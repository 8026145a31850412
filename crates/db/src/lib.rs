//! Storage layer: entity models and repository traits with in-memory
//! implementations.
//!
//! Handlers only see the traits in [`repositories`], so a persistent backend
//! can replace the in-memory one without touching the HTTP layer.

pub mod models;
pub mod repositories;

use std::sync::PoisonError;

use duet_core::error::CoreError;

/// Map a poisoned lock to an internal error instead of panicking.
pub(crate) fn poisoned<T>(store: &'static str) -> impl FnOnce(PoisonError<T>) -> CoreError {
    move |_| CoreError::Internal(format!("{store} store lock poisoned"))
}
