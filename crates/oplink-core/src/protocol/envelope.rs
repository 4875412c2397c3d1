//! Aggregated output envelope.

use std::sync::Arc;

use bytes::Bytes;

/// Self-describing wrapper around one serialized message.
///
/// Cheap to clone: names are shared and the payload is reference-counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    source_name: Arc<str>,
    type_name: Arc<str>,
    payload: Bytes,
}

impl Envelope {
    pub fn new(
        source_name: impl Into<Arc<str>>,
        type_name: impl Into<Arc<str>>,
        payload: Bytes,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            type_name: type_name.into(),
            payload,
        }
    }

    /// Name of the stream the message was received on.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// `"<package>/<name>"` tag of the payload.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Serialized message bytes (zero-copy).
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}
