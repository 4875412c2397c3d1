//! Relay loop: routes inbound messages and flushes the pending envelope on ticks.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use oplink_core::codec::{encode_envelope, MessageCodec};
use oplink_core::error::Result;
use oplink_core::protocol::Envelope;

use crate::obs::RelayMetrics;
use crate::relay::clock::ThrottleClock;
use crate::relay::sink::EnvelopeSink;
use crate::relay::state::{Admission, RelayState};

/// Outcome of one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the sink on arrival (passthrough).
    Emitted,
    /// Stored as the pending envelope; `replaced` if an unflushed one was discarded.
    Buffered { replaced: bool },
    /// Discarded without buffering.
    Dropped,
}

impl Delivery {
    pub fn as_str(self) -> &'static str {
        match self {
            Delivery::Emitted => "emitted",
            Delivery::Buffered { .. } => "buffered",
            Delivery::Dropped => "dropped",
        }
    }
}

/// One input stream relayed into one aggregated sink.
pub struct Relay {
    source_name: Arc<str>,
    codec: Arc<dyn MessageCodec>,
    state: Arc<RelayState>,
    sink: Arc<dyn EnvelopeSink>,
    clock: ThrottleClock,
    metrics: Arc<RelayMetrics>,
}

impl Relay {
    pub fn new(
        source_name: impl Into<Arc<str>>,
        codec: Arc<dyn MessageCodec>,
        state: Arc<RelayState>,
        sink: Arc<dyn EnvelopeSink>,
        clock: ThrottleClock,
        metrics: Arc<RelayMetrics>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            codec,
            state,
            sink,
            clock,
            metrics,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn type_name(&self) -> String {
        self.codec.ident().tag()
    }

    pub fn state(&self) -> &Arc<RelayState> {
        &self.state
    }

    pub fn metrics(&self) -> &Arc<RelayMetrics> {
        &self.metrics
    }

    /// Encode one inbound message and route it by the current mode.
    ///
    /// An encode failure drops only this message; the pending envelope is
    /// left as it was.
    pub fn on_message(&self, msg: &Value) -> Result<Delivery> {
        self.metrics.messages_in.inc(&[]);

        let env = match encode_envelope(&self.source_name, self.codec.as_ref(), msg) {
            Ok(env) => env,
            Err(e) => {
                self.metrics.encode_errors.inc(&[]);
                tracing::warn!(
                    topic = %self.source_name,
                    error = %e,
                    "dropping message that failed to encode"
                );
                return Err(e);
            }
        };

        let delivery = match self.state.admit(env) {
            Admission::Emit(env) => {
                if self.emit(env, "passthrough") {
                    Delivery::Emitted
                } else {
                    Delivery::Dropped
                }
            }
            Admission::Buffered { replaced } => {
                if replaced {
                    self.metrics.pending_overwrites.inc(&[]);
                }
                Delivery::Buffered { replaced }
            }
            Admission::Discarded => {
                self.metrics.dropped.inc(&[("reason", "not_forwarding")]);
                Delivery::Dropped
            }
        };
        tracing::trace!(topic = %self.source_name, delivery = delivery.as_str(), "inbound message");
        Ok(delivery)
    }

    /// Flush the pending envelope if forwarding is on and the rate is finite
    /// and nonzero. Returns whether an envelope reached the sink.
    pub fn on_tick(&self) -> bool {
        match self.state.take_due() {
            Some(env) => self.emit(env, "tick"),
            None => false,
        }
    }

    fn emit(&self, env: Envelope, path: &'static str) -> bool {
        match self.sink.publish(env) {
            Ok(()) => {
                self.metrics.emitted.inc(&[("path", path)]);
                true
            }
            Err(e) => {
                self.metrics.dropped.inc(&[("reason", "sink_error")]);
                tracing::warn!(topic = %self.source_name, error = %e, "sink rejected envelope");
                false
            }
        }
    }

    /// Drive ticks until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// The sleep period is recomputed from the current rate on every
    /// iteration, and a rate change cuts the current wait short.
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            topic = %self.source_name,
            ty = %self.type_name(),
            rate = self.state.rate(),
            idle_period_ms = self.clock.fallback().as_millis() as u64,
            "relay loop started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let rate_changed = self.state.rate_changed();
            let period = self.clock.tick_period(self.state.rate());

            tokio::select! {
                _ = tokio::time::sleep(period) => {
                    self.on_tick();
                }
                _ = rate_changed => {
                    tracing::debug!(topic = %self.source_name, "rate changed, rebuilding timer");
                }
                res = shutdown.changed() => {
                    if res.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!(topic = %self.source_name, "relay loop stopped");
    }
}
