//! Table-driven codec: a message type is a static list of typed fields.

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::error::{OpLinkError, Result};
use crate::protocol::wire::WireWriter;
use crate::protocol::TypeIdent;

use super::MessageCodec;

/// Field wire type.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    String,
    /// `{ secs: u32, nsecs: u32 }`
    Time,
    /// `{ secs: i32, nsecs: i32 }`
    Duration,
    Nested(&'static [FieldSpec]),
}

/// One named field of a message definition.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

const TIME_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("secs", FieldKind::UInt32),
    FieldSpec::new("nsecs", FieldKind::UInt32),
];

const DURATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("secs", FieldKind::Int32),
    FieldSpec::new("nsecs", FieldKind::Int32),
];

/// Codec backed by a static field table.
#[derive(Debug, Clone)]
pub struct SchemaCodec {
    ident: TypeIdent,
    fields: &'static [FieldSpec],
}

impl SchemaCodec {
    pub fn new(ident: TypeIdent, fields: &'static [FieldSpec]) -> Self {
        Self { ident, fields }
    }
}

impl MessageCodec for SchemaCodec {
    fn ident(&self) -> &TypeIdent {
        &self.ident
    }

    fn encode(&self, msg: &Value) -> Result<Bytes> {
        let mut w = WireWriter::new();
        write_struct(&mut w, "", self.fields, msg)?;
        tracing::trace!(ty = %self.ident, len = w.len(), "message encoded");
        Ok(w.finish())
    }
}

fn mismatch(path: &str, expected: &str) -> OpLinkError {
    let at = if path.is_empty() { "<root>" } else { path };
    OpLinkError::Serialization(format!("{at}: expected {expected}"))
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn write_struct(w: &mut WireWriter, path: &str, fields: &[FieldSpec], v: &Value) -> Result<()> {
    let obj: &Map<String, Value> = v.as_object().ok_or_else(|| mismatch(path, "object"))?;

    if let Some(unknown) = obj.keys().find(|k| !fields.iter().any(|f| f.name == k.as_str())) {
        return Err(OpLinkError::Serialization(format!(
            "{}: unknown field",
            join(path, unknown)
        )));
    }

    for f in fields {
        let fpath = join(path, f.name);
        let fv = obj
            .get(f.name)
            .ok_or_else(|| OpLinkError::Serialization(format!("{fpath}: missing field")))?;
        write_field(w, &fpath, f.kind, fv)?;
    }
    Ok(())
}

fn int<T: TryFrom<i64> + TryFrom<u64>>(path: &str, v: &Value, expected: &str) -> Result<T> {
    if let Some(u) = v.as_u64() {
        return <T as TryFrom<u64>>::try_from(u).map_err(|_| mismatch(path, expected));
    }
    if let Some(i) = v.as_i64() {
        return <T as TryFrom<i64>>::try_from(i).map_err(|_| mismatch(path, expected));
    }
    Err(mismatch(path, expected))
}

fn write_field(w: &mut WireWriter, path: &str, kind: FieldKind, v: &Value) -> Result<()> {
    match kind {
        FieldKind::Bool => w.put_bool(v.as_bool().ok_or_else(|| mismatch(path, "bool"))?),
        FieldKind::Int8 => w.put_i8(int(path, v, "int8")?),
        FieldKind::UInt8 => w.put_u8(int(path, v, "uint8")?),
        FieldKind::Int16 => w.put_i16(int(path, v, "int16")?),
        FieldKind::UInt16 => w.put_u16(int(path, v, "uint16")?),
        FieldKind::Int32 => w.put_i32(int(path, v, "int32")?),
        FieldKind::UInt32 => w.put_u32(int(path, v, "uint32")?),
        FieldKind::Int64 => w.put_i64(int(path, v, "int64")?),
        FieldKind::UInt64 => w.put_u64(int(path, v, "uint64")?),
        FieldKind::Float32 => {
            let f = v.as_f64().ok_or_else(|| mismatch(path, "float32"))?;
            let narrowed = f as f32;
            if narrowed.is_infinite() {
                return Err(mismatch(path, "float32 in range"));
            }
            w.put_f32(narrowed);
        }
        FieldKind::Float64 => w.put_f64(v.as_f64().ok_or_else(|| mismatch(path, "float64"))?),
        FieldKind::String => w.put_str(v.as_str().ok_or_else(|| mismatch(path, "string"))?)?,
        FieldKind::Time => write_struct(w, path, TIME_FIELDS, v)?,
        FieldKind::Duration => write_struct(w, path, DURATION_FIELDS, v)?,
        FieldKind::Nested(fields) => write_struct(w, path, fields, v)?,
    }
    Ok(())
}
