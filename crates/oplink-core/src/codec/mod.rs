//! Message codecs (typed JSON message -> serialized bytes).
//!
//! A codec is resolved once at startup from the configured type identifier
//! and then applied to every inbound message. Codecs are pure: they never
//! touch relay state, so a failed encode cannot disturb buffered envelopes.

pub mod schema;
pub mod std_msgs;

use bytes::Bytes;
use serde_json::Value;

use crate::error::Result;
use crate::protocol::{Envelope, TypeIdent};

pub use schema::{FieldKind, FieldSpec, SchemaCodec};

/// Serializer capability for one message type.
pub trait MessageCodec: Send + Sync {
    fn ident(&self) -> &TypeIdent;

    /// Validate `msg` against the type's shape and serialize it.
    fn encode(&self, msg: &Value) -> Result<Bytes>;
}

/// Wrap `msg` into an envelope tagged with the codec's type.
pub fn encode_envelope(
    source_name: &str,
    codec: &dyn MessageCodec,
    msg: &Value,
) -> Result<Envelope> {
    let payload = codec.encode(msg)?;
    Ok(Envelope::new(source_name, codec.ident().tag(), payload))
}
