//! Transport bindings (HTTP inbound publish, WebSocket downstream).
//!
//! The relay core only sees `serde_json::Value` messages in and `Envelope`s
//! out; everything wire-specific lives here.

pub mod downstream;
pub mod frame;
pub mod inbound;
