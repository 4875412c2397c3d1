//! Built-in codec vectors (JSON message -> little-endian bytes).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use oplink_core::codec::{encode_envelope, std_msgs, MessageCodec, SchemaCodec};

fn codec(tag: &str) -> SchemaCodec {
    std_msgs::codecs()
        .unwrap()
        .into_iter()
        .find(|c| c.ident().tag() == tag)
        .unwrap_or_else(|| panic!("no codec for {tag}"))
}

struct Vector {
    tag: &'static str,
    msg: Value,
    hex: &'static str,
}

#[test]
fn std_msgs_vectors() {
    let vectors = [
        Vector { tag: "std_msgs/String", msg: json!({"data": "hi"}), hex: "020000006869" },
        Vector { tag: "std_msgs/Bool", msg: json!({"data": true}), hex: "01" },
        Vector { tag: "std_msgs/Int32", msg: json!({"data": -1}), hex: "ffffffff" },
        Vector { tag: "std_msgs/UInt16", msg: json!({"data": 258}), hex: "0201" },
        Vector { tag: "std_msgs/Float64", msg: json!({"data": 1.5}), hex: "000000000000f83f" },
        Vector { tag: "std_msgs/Empty", msg: json!({}), hex: "" },
        Vector {
            tag: "std_msgs/Header",
            msg: json!({"seq": 1, "stamp": {"secs": 2, "nsecs": 3}, "frame_id": "map"}),
            hex: "010000000200000003000000030000006d6170",
        },
    ];

    for v in vectors {
        let c = codec(v.tag);
        let out = c.encode(&v.msg).unwrap_or_else(|e| panic!("{}: {e}", v.tag));
        let expected = hex::decode(v.hex).unwrap();
        assert_eq!(out.as_ref(), expected.as_slice(), "tag={}", v.tag);
    }
}

#[test]
fn shape_mismatches_are_serialization_errors() {
    let cases = [
        ("std_msgs/String", json!({"data": 5})),
        ("std_msgs/String", json!({})),
        ("std_msgs/String", json!("hi")),
        ("std_msgs/String", json!({"data": "hi", "extra": 1})),
        ("std_msgs/UInt8", json!({"data": 256})),
        ("std_msgs/UInt32", json!({"data": -1})),
        ("std_msgs/Float32", json!({"data": 1e300})),
        ("std_msgs/Header", json!({"seq": 1, "stamp": {"secs": 2}, "frame_id": "map"})),
    ];

    for (tag, msg) in cases {
        let err = codec(tag).encode(&msg).expect_err("must fail");
        assert_eq!(err.code().as_str(), "SERIALIZATION", "tag={tag} msg={msg}");
    }
}

#[test]
fn nested_error_names_the_field_path() {
    let err = codec("std_msgs/Header")
        .encode(&json!({"seq": 1, "stamp": {"secs": "x", "nsecs": 0}, "frame_id": ""}))
        .expect_err("must fail");
    assert!(err.to_string().contains("stamp.secs"), "{err}");
}

#[test]
fn envelope_carries_source_and_tag() {
    let c = codec("std_msgs/String");
    let env = encode_envelope("camera", &c, &json!({"data": "x"})).unwrap();
    assert_eq!(env.source_name(), "camera");
    assert_eq!(env.type_name(), "std_msgs/String");
    assert_eq!(env.payload().as_ref(), hex::decode("0100000078").unwrap().as_slice());
}
