//! Inbound subscription: typed messages POSTed as JSON on the input topic.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::app_state::AppState;

pub async fn publish(State(app): State<AppState>, Json(msg): Json<Value>) -> Response {
    if app.is_draining() {
        return (StatusCode::SERVICE_UNAVAILABLE, "draining").into_response();
    }

    match app.relay().on_message(&msg) {
        Ok(delivery) => (
            StatusCode::ACCEPTED,
            Json(json!({ "delivery": delivery.as_str() })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "code": e.code().as_str(), "msg": e.to_string() })),
        )
            .into_response(),
    }
}
