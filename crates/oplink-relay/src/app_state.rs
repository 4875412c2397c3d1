//! Shared application state for the relay service.
//!
//! Resolves the configured message type, builds the relay around a bounded
//! aggregation queue, and owns the shutdown signal. Startup errors are
//! returned, never panicked on.

use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};

use oplink_core::error::Result;
use oplink_core::protocol::Envelope;

use crate::config::RelayConfig;
use crate::dispatch::CodecRegistry;
use crate::obs::RelayMetrics;
use crate::relay::clock::ThrottleClock;
use crate::relay::{ChannelSink, Relay, RelayState};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<RelayConfig>,
    relay: Arc<Relay>,
    metrics: Arc<RelayMetrics>,
    downstream: Arc<Mutex<mpsc::Receiver<Envelope>>>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl AppState {
    /// Build application state with the built-in codecs.
    pub fn new(cfg: RelayConfig) -> Result<Self> {
        Self::with_registry(cfg, &CodecRegistry::with_builtins()?)
    }

    /// Build application state resolving the input type from `registry`.
    pub fn with_registry(cfg: RelayConfig, registry: &CodecRegistry) -> Result<Self> {
        let section = &cfg.relay;

        // 1) Resolve the input type once; unknown types abort startup.
        let ident = section.type_ident()?;
        let codec = registry.resolve(&ident)?;

        // 2) Shared state + aggregation queue
        let metrics = Arc::new(RelayMetrics::default());
        let state = Arc::new(RelayState::new(section.default_rate));
        let (sink, rx) = ChannelSink::new(section.sink_capacity);

        // 3) Relay
        let relay = Arc::new(Relay::new(
            section.input_topic_name.as_str(),
            codec,
            state,
            Arc::new(sink),
            ThrottleClock::from_fallback_hz(section.fallback_hz),
            Arc::clone(&metrics),
        ));

        tracing::info!(
            input = %section.input_topic_name,
            ty = %ident,
            output = %section.aggregation_topic,
            default_rate = relay.state().rate(),
            "relay configured"
        );

        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            cfg: Arc::new(cfg),
            relay,
            metrics,
            downstream: Arc::new(Mutex::new(rx)),
            shutdown: Arc::new(shutdown),
        })
    }

    pub fn cfg(&self) -> &RelayConfig {
        &self.cfg
    }

    pub fn relay(&self) -> Arc<Relay> {
        Arc::clone(&self.relay)
    }

    pub fn metrics(&self) -> Arc<RelayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Aggregation queue receiver; held by at most one downstream at a time.
    pub fn downstream(&self) -> Arc<Mutex<mpsc::Receiver<Envelope>>> {
        Arc::clone(&self.downstream)
    }

    pub fn shutdown_rx(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Withdraw control services and stop the relay loop.
    pub fn begin_shutdown(&self) {
        self.metrics.set_draining();
        self.shutdown.send_replace(true);
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }
}
