//! Codec registry exports.
//!
//! Maps configured type identifiers to serializer capabilities; looked up
//! once while the relay is being wired.

pub mod registry;

pub use registry::CodecRegistry;
