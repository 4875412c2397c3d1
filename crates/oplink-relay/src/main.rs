//! oplink relay
//!
//! - Inbound:  POST /v1/topics/{input_topic_name}
//! - Outbound: WS   /v1/topics/{aggregation_topic}
//! - Control:  POST /v1/srv/{transport_ctrl}, POST /v1/srv/{rate_ctrl}
//! - Ops:      /healthz, /readyz, /metrics

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use oplink_core::error::{OpLinkError, Result};
use oplink_relay::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code().as_str(), "oplink-relay failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "oplink.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .relay
        .listen
        .parse()
        .map_err(|e| {
            OpLinkError::Configuration(format!("relay.listen must be a valid SocketAddr: {e}"))
        })?;

    let state = AppState::new(cfg)?;
    let relay_loop = tokio::spawn(state.relay().run(state.shutdown_rx()));
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "oplink-relay starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| OpLinkError::Transport(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await
        .map_err(|e| OpLinkError::Transport(format!("server failed: {e}")))?;

    // Covers the server exiting on its own as well as via the signal.
    state.begin_shutdown();
    if let Err(e) = relay_loop.await {
        tracing::error!(error = %e, "relay loop terminated abnormally");
    }
    tracing::info!("oplink-relay stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
    state.begin_shutdown();
}
