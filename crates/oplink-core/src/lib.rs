//! oplink core: transport-agnostic relay primitives, error types, and codecs.
//!
//! This crate defines the envelope value, the type identifier grammar, and the
//! message codecs shared by the relay service and its tests. It intentionally
//! carries no transport or runtime dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed identifiers and mis-shaped messages surface as `OpLinkError`
//! so a single bad message can never take the relay down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod codec;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{OpLinkError, Result};
