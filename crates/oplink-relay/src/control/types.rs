//! Control request/response bodies.
//!
//! JSON has no infinity literal, so rates travel as numbers or as strings
//! (`"inf"`, `"-inf"`, `"infinity"`, `"2.5"`).

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Deserialize)]
pub struct LinkControlRequest {
    #[serde(alias = "Forward")]
    pub forward: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkControlResponse {
    pub state: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateControlRequest {
    #[serde(alias = "Rate")]
    pub rate: RateValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateControlResponse {
    pub state: RateValue,
}

/// A rate in Hz that may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateValue(pub f64);

impl fmt::Display for RateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_infinite() {
            f.write_str(if self.0 > 0.0 { "inf" } else { "-inf" })
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for RateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_finite() {
            serializer.serialize_f64(self.0)
        } else {
            serializer.serialize_str(&self.to_string())
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RateRepr {
    Num(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for RateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RateRepr::deserialize(deserializer)? {
            RateRepr::Num(v) => Ok(RateValue(v)),
            // f64::from_str accepts "inf", "+infinity", "-inf", "nan" case-insensitively
            RateRepr::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(RateValue)
                .map_err(|_| de::Error::custom(format!("invalid rate: {s}"))),
        }
    }
}
