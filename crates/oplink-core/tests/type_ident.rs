//! Type identifier parsing tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use oplink_core::protocol::TypeIdent;

#[test]
fn splits_on_first_separator() {
    let t = TypeIdent::parse("std_msgs/String").unwrap();
    assert_eq!(t.package(), "std_msgs");
    assert_eq!(t.name(), "String");
    assert_eq!(t.tag(), "std_msgs/String");

    let nested = TypeIdent::parse("pkg/sub/Type").unwrap();
    assert_eq!(nested.package(), "pkg");
    assert_eq!(nested.name(), "sub/Type");
}

#[test]
fn missing_separator_is_configuration_error() {
    let err = TypeIdent::parse("String").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn empty_halves_are_rejected() {
    for bad in ["/String", "std_msgs/", "/"] {
        let err = TypeIdent::parse(bad).expect_err(bad);
        assert_eq!(err.code().as_str(), "CONFIGURATION", "input={bad}");
    }
}
