//! Top-level facade crate for oplink.
//!
//! Re-exports the core primitives and the relay library so users can depend on a single crate.

pub mod core {
    pub use oplink_core::*;
}

pub mod relay {
    pub use oplink_relay::*;
}
