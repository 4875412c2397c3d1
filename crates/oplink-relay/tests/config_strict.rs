#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use oplink_relay::{app_state::AppState, config};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
relay:
  input_topic_name: "camera"
  topic_typ: "std_msgs/String" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn ok_minimal_config_uses_node_defaults() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    let r = &cfg.relay;
    assert_eq!(r.input_topic_name, "test");
    assert_eq!(r.topic_type, "std_msgs/String");
    assert_eq!(r.transport_ctrl, "opportunistic_link/link_control");
    assert_eq!(r.rate_ctrl, "opportunistic_link/rate_control");
    assert_eq!(r.aggregation_topic, "Aggregator");
    assert!(r.default_rate.is_infinite() && r.default_rate > 0.0);
    assert_eq!(r.fallback_hz, 10.0);
}

#[test]
fn yaml_rates_and_negative_default() {
    let cfg = config::load_from_str(
        r#"
version: 1
relay:
  default_rate: -2.5
"#,
    )
    .expect("must parse");
    let state = AppState::new(cfg).expect("must build");
    assert_eq!(state.relay().state().rate(), 2.5);
}

#[test]
fn malformed_type_identifier_is_rejected() {
    let bad = r#"
version: 1
relay:
  topic_type: "String"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn unknown_type_fails_at_startup() {
    let cfg = config::load_from_str(
        r#"
version: 1
relay:
  topic_type: "sensor_msgs/PointCloud2"
"#,
    )
    .expect("syntactically valid");
    let err = AppState::new(cfg).err().expect("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
    assert!(err.to_string().contains("sensor_msgs/PointCloud2"));
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        "version: 2\n",
        "version: 1\nrelay:\n  fallback_hz: 0\n",
        "version: 1\nrelay:\n  fallback_hz: .inf\n",
        "version: 1\nrelay:\n  default_rate: .nan\n",
        "version: 1\nrelay:\n  sink_capacity: 0\n",
        "version: 1\nrelay:\n  input_topic_name: \"\"\n",
        "version: 1\nrelay:\n  rate_ctrl: \"opportunistic_link/link_control\"\n",
        "version: 1\nrelay:\n  aggregation_topic: \"test\"\n",
        "version: 1\nrelay:\n  input_topic_name: \"*all\"\n",
        "version: 1\nrelay:\n  input_topic_name: \":id\"\n",
        "version: 1\nrelay:\n  transport_ctrl: \"a/*x/b\"\n",
        "version: 1\nrelay:\n  rate_ctrl: \"srv/{rate}\"\n",
        "version: 1\nrelay:\n  aggregation_topic: \"agg}\"\n",
    ];
    for yaml in cases {
        let err = config::load_from_str(yaml).expect_err(yaml);
        assert_eq!(err.code().as_str(), "CONFIGURATION", "yaml={yaml}");
    }
}

#[test]
fn route_syntax_in_names_fails_before_routing() {
    let err = config::load_from_str("version: 1\nrelay:\n  transport_ctrl: \"a/*x/b\"\n")
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
    assert!(err.to_string().contains("relay.transport_ctrl"), "{err}");
}
