//! Storage error types

use thiserror::Error;

/// Errors that can occur during slot storage operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No persistence context (e.g. storage disabled or not initialized)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Storage backend error (database, browser API, etc.)
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Value does not fit in the remaining storage quota
    #[error("quota exceeded writing '{key}' ({size} bytes)")]
    QuotaExceeded { key: String, size: usize },

    /// No id above the largest stored one fits in an `i64`
    #[error("local id space exhausted (largest id {max_id})")]
    IdExhausted { max_id: i64 },
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
