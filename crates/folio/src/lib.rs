//! # Folio Shared Library
//!
//! Infrastructure shared by every Folio front end:
//! - **config**: `FolioConfig`, loaded from TOML and validated
//! - **session**: the explicit identity handed to every operation
//! - **service**: `ClaimsService`, which decides between the remote claims
//!   API and local storage for each operation and falls back when the
//!   backend is unreachable
//! - **error**: Common error types
//! - **tracing**: Logging setup with Folio segment prefixes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use folio::{ClaimsService, FolioConfig, Session};
//! use folio_core::{LocalClaimStore, MemorySlots};
//! use folio_remote::RemoteClient;
//!
//! # async fn example() -> folio::Result<()> {
//! let config = FolioConfig::default();
//! let backend = RemoteClient::new(config.remote_config())?;
//! let local = LocalClaimStore::with_key(MemorySlots::new(), config.claims_key.clone());
//! let mut service = ClaimsService::new(backend, local).with_config(&config);
//!
//! let session = Session::authenticated("token", "42");
//! let loaded = service.load_claims(&session).await;
//! println!("{} claims from {:?}", loaded.claims.len(), loaded.provenance);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod session;
pub mod tracing;

// Re-export commonly used items at crate root
pub use config::FolioConfig;
pub use error::{Error, Result};
pub use service::{
    ClaimsExport, ClaimsService, Confirmation, ConfirmationRequest, FallbackReason, LoadedClaims,
    PendingAction, Provenance, Snapshot, Step, SyncError, MAX_ISSUER_PAGES,
};
pub use session::{Session, DEFAULT_LOCAL_ONLY_TOKEN};
