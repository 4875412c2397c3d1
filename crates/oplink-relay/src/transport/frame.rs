//! Outbound aggregation frame (JSON text, base64 payload).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use oplink_core::error::{OpLinkError, Result};
use oplink_core::protocol::Envelope;

/// Serialized message as sent to the downstream consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SerializedMessage {
    pub topic_name: String,
    pub topic_type: String,
    /// Base64 of the serialized message bytes.
    pub data: String,
}

impl SerializedMessage {
    pub fn from_envelope(env: &Envelope) -> Self {
        Self {
            topic_name: env.source_name().to_string(),
            topic_type: env.type_name().to_string(),
            data: STANDARD.encode(env.payload()),
        }
    }

    pub fn payload(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| OpLinkError::Transport(format!("invalid base64 payload: {e}")))
    }
}

pub fn encode_frame(env: &Envelope) -> Result<String> {
    serde_json::to_string(&SerializedMessage::from_envelope(env))
        .map_err(|e| OpLinkError::Internal(format!("frame encode failed: {e}")))
}
