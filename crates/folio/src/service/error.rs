//! Resolver errors

use folio_core::{ImportError, StoreError};
use folio_remote::RemoteError;
use thiserror::Error;

/// Errors from resolver write operations.
///
/// Reads never fail: they fall back to local storage instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// The remote API rejected or never received a write. Not retried.
    #[error("remote write failed: {source}")]
    RemoteWrite {
        #[source]
        source: RemoteError,
        /// Whether the same write can be repeated against local storage
        /// (see `ClaimsService::create_claim_locally`)
        local_fallback_available: bool,
    },

    /// The loaded set lives on the backend but the session can no longer
    /// reach it
    #[error("session has no backend access for remotely loaded claims")]
    NotEligible,

    #[error("local storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

impl SyncError {
    pub fn local_fallback_available(&self) -> bool {
        matches!(
            self,
            SyncError::RemoteWrite {
                local_fallback_available: true,
                ..
            }
        )
    }
}
