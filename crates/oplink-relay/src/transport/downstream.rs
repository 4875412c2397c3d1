//! Downstream aggregation consumer (WebSocket).
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS for the single consumer of the aggregation topic
//! - Reject a second concurrent consumer with 409
//! - Forward every queued envelope as one JSON text frame
//! - Close when the consumer leaves or shutdown begins

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, OwnedMutexGuard};

use oplink_core::protocol::Envelope;

use crate::app_state::AppState;
use crate::transport::frame::encode_frame;

pub async fn ws_upgrade(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let Ok(rx) = app.downstream().try_lock_owned() else {
        return (StatusCode::CONFLICT, "aggregation topic already has a consumer").into_response();
    };

    ws.on_upgrade(move |socket| run_downstream(app, rx, socket))
}

async fn run_downstream(
    app: AppState,
    mut rx: OwnedMutexGuard<mpsc::Receiver<Envelope>>,
    socket: WebSocket,
) {
    let topic = app.cfg().relay.aggregation_topic.clone();
    let metrics = app.metrics();
    let mut shutdown = app.shutdown_rx();

    metrics.downstream_connected.inc(&[]);
    tracing::info!(%topic, "downstream attached");

    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        if *shutdown.borrow() {
            let _ = ws_tx.send(Message::Close(None)).await;
            break;
        }

        tokio::select! {
            maybe_env = rx.recv() => {
                let Some(env) = maybe_env else { break; };
                match encode_frame(&env) {
                    Ok(text) => {
                        if ws_tx.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!(%topic, error = %e, "dropping envelope"),
                }
            }

            incoming = ws_rx.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }

            res = shutdown.changed() => {
                if res.is_err() {
                    break;
                }
            }
        }
    }

    metrics.downstream_connected.dec(&[]);
    tracing::info!(%topic, "downstream detached");
}
