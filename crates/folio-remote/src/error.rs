//! Error types for the remote claims client

use thiserror::Error;

/// Remote client error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// The API answered with a non-2xx status
    #[error("claims API returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never got an answer (DNS, connect, TLS, reset, timeout)
    #[error("claims API unreachable: {0}")]
    Network(String),

    /// A 2xx response whose body could not be understood
    #[error("invalid response from claims API: {0}")]
    Decode(String),

    /// The client could not be built from its configuration
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl RemoteError {
    /// Network failures and HTTP errors are what the resolver falls back on.
    pub fn is_transport(&self) -> bool {
        matches!(self, RemoteError::Http { .. } | RemoteError::Network(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for remote operations
pub type Result<T> = std::result::Result<T, RemoteError>;
