//! Control endpoints and inbound publish over the HTTP router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use oplink_relay::{app_state::AppState, config, router, transport::frame::SerializedMessage};

const LINK: &str = "/v1/srv/opportunistic_link/link_control";
const RATE: &str = "/v1/srv/opportunistic_link/rate_control";
const INPUT: &str = "/v1/topics/test";

fn app(yaml: &str) -> (AppState, Router) {
    let cfg = config::load_from_str(yaml).unwrap();
    let state = AppState::new(cfg).unwrap();
    (state.clone(), router::build_router(state))
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

async fn post(router: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, req).await
}

async fn get(router: &Router, path: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(router, req).await
}

#[tokio::test]
async fn forwarding_control_echoes_requested_value() {
    let (state, router) = app("version: 1\n");

    let (status, body) = post(&router, LINK, json!({ "forward": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "state": true }));
    assert!(state.relay().state().forwarding());

    let (_, body) = post(&router, LINK, json!({ "Forward": false })).await;
    assert_eq!(body, json!({ "state": false }));
    assert!(!state.relay().state().forwarding());
}

#[tokio::test]
async fn rate_control_normalizes_input() {
    let (state, router) = app("version: 1\n");

    let (status, body) = post(&router, RATE, json!({ "rate": -5.0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "state": 5.0 }));
    assert_eq!(state.relay().state().rate(), 5.0);

    let (_, body) = post(&router, RATE, json!({ "rate": "-Infinity" })).await;
    assert_eq!(body, json!({ "state": "inf" }));

    let (_, body) = post(&router, RATE, json!({ "Rate": "0.5" })).await;
    assert_eq!(body, json!({ "state": 0.5 }));

    let (_, body) = post(&router, RATE, json!({ "rate": 0 })).await;
    assert_eq!(body, json!({ "state": 0.0 }));
}

#[tokio::test]
async fn passthrough_scenario_over_http() {
    let (state, router) = app("version: 1\n");

    let (status, body) = post(&router, INPUT, json!({ "data": "M1" })).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({ "delivery": "dropped" }));

    post(&router, LINK, json!({ "forward": true })).await;

    let (_, body) = post(&router, INPUT, json!({ "data": "M2" })).await;
    assert_eq!(body, json!({ "delivery": "emitted" }));

    let downstream = state.downstream();
    let mut rx = downstream.lock().await;
    let env = rx.try_recv().unwrap();
    assert!(rx.try_recv().is_err());

    let frame = SerializedMessage::from_envelope(&env);
    assert_eq!(frame.topic_name, "test");
    assert_eq!(frame.topic_type, "std_msgs/String");
    assert_eq!(frame.payload().unwrap(), b"\x02\x00\x00\x00M2".to_vec());
}

#[tokio::test]
async fn buffered_delivery_is_reported() {
    let (_state, router) = app("version: 1\nrelay:\n  default_rate: 2.0\n");

    let (_, body) = post(&router, INPUT, json!({ "data": "M1" })).await;
    assert_eq!(body, json!({ "delivery": "buffered" }));
}

#[tokio::test]
async fn malformed_message_is_unprocessable() {
    let (_state, router) = app("version: 1\n");

    let (status, body) = post(&router, INPUT, json!({ "payload": "x" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "SERIALIZATION");
}

#[tokio::test]
async fn other_topics_are_not_routed() {
    let (_state, router) = app("version: 1\n");

    let (status, _) = post(&router, "/v1/topics/other", json!({ "data": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn services_are_withdrawn_after_shutdown() {
    let (state, router) = app("version: 1\n");
    let (status, _) = get(&router, "/readyz").await;
    assert_eq!(status, StatusCode::OK);

    state.begin_shutdown();

    let (status, _) = post(&router, LINK, json!({ "forward": true })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let (status, _) = post(&router, RATE, json!({ "rate": 1.0 })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let (status, _) = get(&router, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!state.relay().state().forwarding());
}

#[tokio::test]
async fn metrics_expose_state_and_counters() {
    let (_state, router) = app("version: 1\n");
    post(&router, LINK, json!({ "forward": true })).await;
    post(&router, INPUT, json!({ "data": "M1" })).await;

    let (status, body) = get(&router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().unwrap();
    assert!(text.contains("oplink_forwarding 1"), "{text}");
    assert!(text.contains("oplink_rate +Inf"), "{text}");
    assert!(text.contains("oplink_emitted_total{path=\"passthrough\"} 1"), "{text}");
    assert!(text.contains("oplink_control_requests_total{endpoint=\"link_control\"} 1"), "{text}");
}
