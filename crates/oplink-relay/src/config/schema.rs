use serde::Deserialize;

use oplink_core::error::{OpLinkError, Result};
use oplink_core::protocol::TypeIdent;

const ROUTE_SYNTAX: &[char] = &['*', ':', '{', '}'];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub version: u32,

    #[serde(default)]
    pub relay: RelaySection,
}

impl RelayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OpLinkError::Configuration(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.relay.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_input_topic_name")]
    pub input_topic_name: String,

    #[serde(default = "default_topic_type")]
    pub topic_type: String,

    #[serde(default = "default_transport_ctrl")]
    pub transport_ctrl: String,

    #[serde(default = "default_rate_ctrl")]
    pub rate_ctrl: String,

    /// Hz. `.inf` means unthrottled passthrough; the sign is ignored.
    #[serde(default = "default_rate")]
    pub default_rate: f64,

    #[serde(default = "default_aggregation_topic")]
    pub aggregation_topic: String,

    /// Idle tick frequency used while the rate is 0 or infinite.
    #[serde(default = "default_fallback_hz")]
    pub fallback_hz: f64,

    #[serde(default = "default_sink_capacity")]
    pub sink_capacity: usize,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            input_topic_name: default_input_topic_name(),
            topic_type: default_topic_type(),
            transport_ctrl: default_transport_ctrl(),
            rate_ctrl: default_rate_ctrl(),
            default_rate: default_rate(),
            aggregation_topic: default_aggregation_topic(),
            fallback_hz: default_fallback_hz(),
            sink_capacity: default_sink_capacity(),
        }
    }
}

impl RelaySection {
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("relay.input_topic_name", &self.input_topic_name),
            ("relay.transport_ctrl", &self.transport_ctrl),
            ("relay.rate_ctrl", &self.rate_ctrl),
            ("relay.aggregation_topic", &self.aggregation_topic),
        ];
        for (field, v) in names {
            if v.trim_matches('/').is_empty() {
                return Err(OpLinkError::Configuration(format!("{field} must not be empty")));
            }
            // names become literal route segments
            if v.contains(ROUTE_SYNTAX) {
                return Err(OpLinkError::Configuration(format!(
                    "{field} must not contain any of `*`, `:`, `{{`, `}}`: {v}"
                )));
            }
        }

        self.type_ident()?;

        if self.default_rate.is_nan() {
            return Err(OpLinkError::Configuration("relay.default_rate must be a number".into()));
        }
        if !(self.fallback_hz.is_finite() && self.fallback_hz > 0.0) {
            return Err(OpLinkError::Configuration(
                "relay.fallback_hz must be finite and greater than 0".into(),
            ));
        }
        if self.sink_capacity == 0 {
            return Err(OpLinkError::Configuration("relay.sink_capacity must be at least 1".into()));
        }
        if self.transport_path() == self.rate_path() {
            return Err(OpLinkError::Configuration(
                "relay.transport_ctrl and relay.rate_ctrl must differ".into(),
            ));
        }
        if self.input_path() == self.aggregation_path() {
            return Err(OpLinkError::Configuration(
                "relay.input_topic_name and relay.aggregation_topic must differ".into(),
            ));
        }
        Ok(())
    }

    pub fn type_ident(&self) -> Result<TypeIdent> {
        TypeIdent::parse(&self.topic_type)
    }

    pub fn input_path(&self) -> String {
        format!("/v1/topics/{}", self.input_topic_name.trim_matches('/'))
    }

    pub fn aggregation_path(&self) -> String {
        format!("/v1/topics/{}", self.aggregation_topic.trim_matches('/'))
    }

    pub fn transport_path(&self) -> String {
        format!("/v1/srv/{}", self.transport_ctrl.trim_matches('/'))
    }

    pub fn rate_path(&self) -> String {
        format!("/v1/srv/{}", self.rate_ctrl.trim_matches('/'))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_input_topic_name() -> String {
    "test".into()
}
fn default_topic_type() -> String {
    "std_msgs/String".into()
}
fn default_transport_ctrl() -> String {
    "opportunistic_link/link_control".into()
}
fn default_rate_ctrl() -> String {
    "opportunistic_link/rate_control".into()
}
fn default_rate() -> f64 {
    f64::INFINITY
}
fn default_aggregation_topic() -> String {
    "Aggregator".into()
}
fn default_fallback_hz() -> f64 {
    10.0
}
fn default_sink_capacity() -> usize {
    1024
}
