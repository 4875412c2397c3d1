//! Shared error type across oplink crates.

use thiserror::Error;

/// Stable error codes surfaced in HTTP bodies and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Startup configuration is malformed or unresolvable.
    Configuration,
    /// A single message could not be encoded.
    Serialization,
    /// Publish/subscribe/service plumbing failed.
    Transport,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Configuration => "CONFIGURATION",
            ErrorCode::Serialization => "SERIALIZATION",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OpLinkError>;

/// Unified error type used by core and relay.
#[derive(Debug, Error)]
pub enum OpLinkError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl OpLinkError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            OpLinkError::Configuration(_) => ErrorCode::Configuration,
            OpLinkError::Serialization(_) => ErrorCode::Serialization,
            OpLinkError::Transport(_) => ErrorCode::Transport,
            OpLinkError::Internal(_) => ErrorCode::Internal,
        }
    }
}
