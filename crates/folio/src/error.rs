//! Common error types for Folio components.

use folio_core::{ImportError, StoreError};
use folio_remote::RemoteError;
use thiserror::Error;

use crate::service::SyncError;

/// Common error type for Folio operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Slot storage error
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Remote claims API error
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Import error
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// Resolver error
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Caller supplied unusable input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using Folio Error.
pub type Result<T> = std::result::Result<T, Error>;
