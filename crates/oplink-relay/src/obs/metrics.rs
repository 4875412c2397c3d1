//! Minimal metrics registry for the relay.
//!
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering inside one metric family.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

use crate::relay::Snapshot;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn render_labels(key: &[(String, String)]) -> String {
    if key.is_empty() {
        return String::new();
    }
    let inner = key
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{inner}}}")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{} {}", name, render_labels(r.key()), val);
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<Vec<(String, String)>, AtomicI64>,
}

impl GaugeVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) { self.add(labels, 1); }
    /// Decrement by 1.
    pub fn dec(&self, labels: &[(&str, &str)]) { self.add(labels, -1); }

    /// Add an arbitrary signed delta.
    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self.map.entry(label_key(labels)).or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{} {}", name, render_labels(r.key()), val);
        }
    }
}

#[derive(Default)]
pub struct RelayMetrics {
    pub messages_in: CounterVec,
    pub emitted: CounterVec,
    pub dropped: CounterVec,
    pub pending_overwrites: CounterVec,
    pub encode_errors: CounterVec,
    pub control_requests: CounterVec,
    pub downstream_connected: GaugeVec,
    draining: AtomicBool,
}

impl RelayMetrics {
    /// Mark draining state.
    pub fn set_draining(&self) { self.draining.store(true, Ordering::Relaxed); }
    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool { self.draining.load(Ordering::Relaxed) }

    /// Render all registered metrics plus the live relay state.
    pub fn render(&self, state: &Snapshot) -> String {
        let mut out = String::new();
        self.messages_in.render("oplink_messages_in_total", &mut out);
        self.emitted.render("oplink_emitted_total", &mut out);
        self.dropped.render("oplink_dropped_total", &mut out);
        self.pending_overwrites.render("oplink_pending_overwrites_total", &mut out);
        self.encode_errors.render("oplink_encode_errors_total", &mut out);
        self.control_requests.render("oplink_control_requests_total", &mut out);
        self.downstream_connected.render("oplink_downstream_connected", &mut out);

        let rate = if state.rate.is_infinite() {
            "+Inf".to_string()
        } else {
            state.rate.to_string()
        };
        let gauges = [
            ("oplink_forwarding", u8::from(state.forwarding).to_string()),
            ("oplink_rate", rate),
            ("oplink_pending", u8::from(state.pending).to_string()),
            ("oplink_draining", u8::from(self.is_draining()).to_string()),
        ];
        for (name, v) in gauges {
            let _ = writeln!(out, "# TYPE {} gauge\n{} {}", name, name, v);
        }
        out
    }
}
