//! Built-in `std_msgs` message definitions.

use crate::error::Result;
use crate::protocol::TypeIdent;

use super::schema::{FieldKind, FieldSpec, SchemaCodec};

const PACKAGE: &str = "std_msgs";

const HEADER: &[FieldSpec] = &[
    FieldSpec::new("seq", FieldKind::UInt32),
    FieldSpec::new("stamp", FieldKind::Time),
    FieldSpec::new("frame_id", FieldKind::String),
];

macro_rules! data_msg {
    ($kind:expr) => {
        &[FieldSpec::new("data", $kind)]
    };
}

const DEFINITIONS: &[(&str, &[FieldSpec])] = &[
    ("Bool", data_msg!(FieldKind::Bool)),
    // `byte` and `char` are the legacy aliases of int8 / uint8.
    ("Byte", data_msg!(FieldKind::Int8)),
    ("Char", data_msg!(FieldKind::UInt8)),
    ("Int8", data_msg!(FieldKind::Int8)),
    ("UInt8", data_msg!(FieldKind::UInt8)),
    ("Int16", data_msg!(FieldKind::Int16)),
    ("UInt16", data_msg!(FieldKind::UInt16)),
    ("Int32", data_msg!(FieldKind::Int32)),
    ("UInt32", data_msg!(FieldKind::UInt32)),
    ("Int64", data_msg!(FieldKind::Int64)),
    ("UInt64", data_msg!(FieldKind::UInt64)),
    ("Float32", data_msg!(FieldKind::Float32)),
    ("Float64", data_msg!(FieldKind::Float64)),
    ("String", data_msg!(FieldKind::String)),
    ("Time", data_msg!(FieldKind::Time)),
    ("Duration", data_msg!(FieldKind::Duration)),
    ("Empty", &[]),
    ("Header", HEADER),
];

/// All built-in codecs.
pub fn codecs() -> Result<Vec<SchemaCodec>> {
    DEFINITIONS
        .iter()
        .map(|(name, fields)| {
            let ident = TypeIdent::parse(&format!("{PACKAGE}/{name}"))?;
            Ok(SchemaCodec::new(ident, fields))
        })
        .collect()
}
