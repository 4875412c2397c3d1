//! Guarded relay state (forwarding flag, rate, pending envelope).

use std::sync::{Mutex, MutexGuard};

use tokio::sync::futures::Notified;
use tokio::sync::Notify;

use oplink_core::protocol::Envelope;

/// Emission behavior derived from `forwarding` and `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMode {
    /// Forwarding off: inbound messages are buffered (finite rate) or discarded (infinite rate).
    Dropping,
    /// Forwarding on, finite rate: last value is flushed once per tick.
    Buffering,
    /// Forwarding on, infinite rate: every message is emitted on arrival.
    Passthrough,
    /// Rate 0: nothing is emitted.
    Suppressed,
}

impl RelayMode {
    pub fn derive(forwarding: bool, rate: f64) -> Self {
        if rate == 0.0 {
            RelayMode::Suppressed
        } else if !forwarding {
            RelayMode::Dropping
        } else if rate.is_infinite() {
            RelayMode::Passthrough
        } else {
            RelayMode::Buffering
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelayMode::Dropping => "dropping",
            RelayMode::Buffering => "buffering",
            RelayMode::Passthrough => "passthrough",
            RelayMode::Suppressed => "suppressed",
        }
    }
}

/// Point-in-time copy of the state, for diagnostics and metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub forwarding: bool,
    pub rate: f64,
    pub pending: bool,
}

impl Snapshot {
    pub fn mode(&self) -> RelayMode {
        RelayMode::derive(self.forwarding, self.rate)
    }
}

/// What happened to an inbound envelope.
#[derive(Debug)]
pub(crate) enum Admission {
    /// Passthrough: hand to the sink now.
    Emit(Envelope),
    /// Stored as the pending envelope.
    Buffered { replaced: bool },
    /// Infinite rate with forwarding off.
    Discarded,
}

#[derive(Debug)]
struct Inner {
    forwarding: bool,
    rate: f64,
    pending: Option<Envelope>,
}

/// The single shared mutable state of the relay.
///
/// Every field access goes through one mutex; no method holds it across an
/// await or a sink call.
#[derive(Debug)]
pub struct RelayState {
    inner: Mutex<Inner>,
    rate_changed: Notify,
}

/// `abs(rate)`; NaN collapses to 0 (suppression).
pub fn normalize_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.abs()
    }
}

impl RelayState {
    pub fn new(default_rate: f64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                forwarding: false,
                rate: normalize_rate(default_rate),
                pending: None,
            }),
            rate_changed: Notify::new(),
        }
    }

    // A poisoned lock only means another thread panicked mid-update; the
    // three fields are always individually valid, so keep serving.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn forwarding(&self) -> bool {
        self.lock().forwarding
    }

    /// Set the forwarding flag and return the value now in effect.
    pub fn set_forwarding(&self, forwarding: bool) -> bool {
        let mut g = self.lock();
        g.forwarding = forwarding;
        g.forwarding
    }

    pub fn rate(&self) -> f64 {
        self.lock().rate
    }

    /// Store `abs(rate)`, wake the clock, and return the value now in effect.
    pub fn set_rate(&self, rate: f64) -> f64 {
        let current = {
            let mut g = self.lock();
            g.rate = normalize_rate(rate);
            g.rate
        };
        self.rate_changed.notify_waiters();
        current
    }

    /// Resolves on the next `set_rate`.
    pub fn rate_changed(&self) -> Notified<'_> {
        self.rate_changed.notified()
    }

    pub fn mode(&self) -> RelayMode {
        let g = self.lock();
        RelayMode::derive(g.forwarding, g.rate)
    }

    /// Copy of the pending envelope, if any.
    pub fn pending(&self) -> Option<Envelope> {
        self.lock().pending.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        let g = self.lock();
        Snapshot {
            forwarding: g.forwarding,
            rate: g.rate,
            pending: g.pending.is_some(),
        }
    }

    /// Route one freshly encoded envelope.
    pub(crate) fn admit(&self, env: Envelope) -> Admission {
        let mut g = self.lock();
        if g.rate.is_infinite() {
            return if g.forwarding {
                Admission::Emit(env)
            } else {
                Admission::Discarded
            };
        }
        let replaced = g.pending.replace(env).is_some();
        Admission::Buffered { replaced }
    }

    /// Take the pending envelope if a tick may flush it right now.
    pub(crate) fn take_due(&self) -> Option<Envelope> {
        let mut g = self.lock();
        let flushable = g.forwarding && g.rate.is_finite() && g.rate != 0.0;
        if flushable {
            g.pending.take()
        } else {
            None
        }
    }
}
