//! Protocol modules (type identifiers, envelopes, wire encoding).
//!
//! - `type_ident`: `"<package>/<name>"` identifiers resolved once at startup.
//! - `envelope`: the self-describing value handed to the downstream sink.
//! - `wire`: little-endian writer used by message codecs.

pub mod envelope;
pub mod type_ident;
pub mod wire;

pub use envelope::Envelope;
pub use type_ident::TypeIdent;
