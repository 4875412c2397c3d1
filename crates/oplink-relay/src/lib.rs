//! oplink relay library entry.
//!
//! This crate wires configuration, codec resolution, the throttled relay
//! loop, the control endpoints, and the transport bindings into one
//! service. It is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod relay;
pub mod router;
pub mod transport;
