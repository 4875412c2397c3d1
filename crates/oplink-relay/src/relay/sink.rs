//! Downstream sink abstraction.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use oplink_core::error::{OpLinkError, Result};
use oplink_core::protocol::Envelope;

/// Takes envelopes without blocking the caller.
pub trait EnvelopeSink: Send + Sync {
    fn publish(&self, env: Envelope) -> Result<()>;
}

/// Bounded queue sink: `try_send` only, a full queue drops the envelope.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Envelope>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl EnvelopeSink for ChannelSink {
    fn publish(&self, env: Envelope) -> Result<()> {
        self.tx.try_send(env).map_err(|e| match e {
            TrySendError::Full(_) => OpLinkError::Transport("aggregation queue full".into()),
            TrySendError::Closed(_) => OpLinkError::Transport("aggregation queue closed".into()),
        })
    }
}
