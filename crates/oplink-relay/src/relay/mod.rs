//! Relay runtime: shared state, throttle clock, and the scheduling loop.
//!
//! Inbound messages and clock ticks both go through `Relay`; control
//! endpoints only touch `RelayState`. The loop derives its mode from the
//! forwarding flag and rate on every event instead of storing one.

pub mod clock;
pub mod engine;
pub mod sink;
pub mod state;

pub use engine::{Delivery, Relay};
pub use sink::{ChannelSink, EnvelopeSink};
pub use state::{RelayMode, RelayState, Snapshot};
