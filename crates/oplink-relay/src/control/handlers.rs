use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::app_state::AppState;

use super::types::{
    LinkControlRequest, LinkControlResponse, RateControlRequest, RateControlResponse, RateValue,
};

fn withdrawn() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "service withdrawn").into_response()
}

/// Forwarding Control: set the flag, echo the value now in effect.
pub async fn link_control(
    State(app): State<AppState>,
    Json(req): Json<LinkControlRequest>,
) -> Response {
    if app.is_draining() {
        return withdrawn();
    }
    app.metrics().control_requests.inc(&[("endpoint", "link_control")]);

    let relay = app.relay();
    let state = relay.state().set_forwarding(req.forward);
    tracing::info!(topic = relay.source_name(), forward = state, "set forwarding");

    Json(LinkControlResponse { state }).into_response()
}

/// Rate Control: store `abs(rate)`, echo the value now in effect.
pub async fn rate_control(
    State(app): State<AppState>,
    Json(req): Json<RateControlRequest>,
) -> Response {
    if app.is_draining() {
        return withdrawn();
    }
    app.metrics().control_requests.inc(&[("endpoint", "rate_control")]);

    let relay = app.relay();
    if req.rate.0.is_nan() {
        tracing::warn!(topic = relay.source_name(), "rate NaN normalized to 0");
    }
    let current = RateValue(relay.state().set_rate(req.rate.0));
    tracing::info!(topic = relay.source_name(), rate = %current, "set rate");

    Json(RateControlResponse { state: current }).into_response()
}
