//! Domain rules for Duet: error type, identifiers, room pairing and the
//! shared player state machine.
//!
//! This crate performs no I/O so the repositories and the HTTP layer can
//! share one definition of every rule.

pub mod error;
pub mod pairing;
pub mod player;
pub mod types;
