//! Message type identifiers of the form `"<package>/<name>"`.

use std::fmt;

use crate::error::{OpLinkError, Result};

/// Parsed message type identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdent {
    package: String,
    name: String,
}

impl TypeIdent {
    /// Parse `"<package>/<name>"`, splitting on the first `/`.
    pub fn parse(s: &str) -> Result<Self> {
        let (package, name) = s.split_once('/').ok_or_else(|| {
            OpLinkError::Configuration(format!(
                "invalid type identifier: {s} (expected package/name)"
            ))
        })?;
        if package.is_empty() || name.is_empty() {
            return Err(OpLinkError::Configuration(format!(
                "invalid type identifier: {s} (empty package or name)"
            )));
        }
        Ok(Self {
            package: package.to_string(),
            name: name.to_string(),
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag carried on every envelope.
    pub fn tag(&self) -> String {
        format!("{}/{}", self.package, self.name)
    }
}

impl fmt::Display for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.name)
    }
}
