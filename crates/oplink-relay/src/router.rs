//! Axum router wiring.
//!
//! Routes are derived from the configured topic and service names:
//! - `POST /v1/topics/{input}`       inbound subscription
//! - `GET  /v1/topics/{aggregation}` downstream WebSocket
//! - `POST /v1/srv/{transport_ctrl}` forwarding control
//! - `POST /v1/srv/{rate_ctrl}`      rate control

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, control, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let relay = &state.cfg().relay;
    let input = relay.input_path();
    let aggregation = relay.aggregation_path();
    let transport_ctrl = relay.transport_path();
    let rate_ctrl = relay.rate_path();

    Router::new()
        .route(&input, post(transport::inbound::publish))
        .route(&aggregation, get(transport::downstream::ws_upgrade))
        .route(&transport_ctrl, post(control::link_control))
        .route(&rate_ctrl, post(control::rate_control))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
