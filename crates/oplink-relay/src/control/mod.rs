//! Control endpoints (forwarding toggle, rate set).
//!
//! Both are plain request/response handlers over the shared `RelayState`.
//! Inputs are normalized, never rejected; once shutdown begins the services
//! are withdrawn and answer 503.

pub mod handlers;
pub mod types;

pub use handlers::{link_control, rate_control};
pub use types::{
    LinkControlRequest, LinkControlResponse, RateControlRequest, RateControlResponse, RateValue,
};
