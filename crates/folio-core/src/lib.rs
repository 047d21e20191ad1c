//! Folio Core
//!
//! The storage-independent half of Folio's claims layer. Everything here is
//! synchronous and free of network I/O so it can run the same way natively
//! and in the browser (WASM).
//!
//! # Modules
//!
//! - `claim` - claim records, inputs, patches and the builder
//! - `rating` - star rating to trust score mapping
//! - `uri` - subject/issuer URI normalization
//! - `storage` - key/value slot abstraction (`SlotStorage`) and `MemorySlots`
//! - `local` - local claim store persisted as one JSON array in a slot
//! - `merge` - import of external batches into the local set
//! - `analytics` - counts, averages and distributions over a claim set
//! - `export` - dated JSON export documents
//! - `profile` - profile settings kept in a sibling slot
//!
//! # Example
//!
//! ```rust
//! use folio_core::{ClaimBuilder, LocalClaimStore, MemorySlots};
//!
//! let store = LocalClaimStore::new(MemorySlots::new());
//! let claim = store
//!     .create(
//!         ClaimBuilder::new()
//!             .subject("example.com/alice")
//!             .claim_type("HAS_SKILL")
//!             .statement("Rust")
//!             .effective_date("2024-01-01")
//!             .stars(5)
//!             .build(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(claim.subject, "https://example.com/alice");
//! assert_eq!(claim.score, Some(1.0));
//! assert_eq!(store.list().len(), 1);
//! ```

pub mod analytics;
pub mod claim;
pub mod export;
pub mod local;
pub mod merge;
pub mod profile;
pub mod rating;
pub mod storage;
pub mod uri;

// Re-export main types at crate root
pub use analytics::{summarize, CategoryCount, PortfolioSummary};
pub use claim::{Claim, ClaimBuilder, ClaimInput, ClaimPatch, HowKnown};
pub use export::ExportDocument;
pub use local::{LocalClaimStore, DEFAULT_CLAIMS_KEY};
pub use merge::{import_batch, merge_batch, parse_batch, ImportError, ImportOutcome, ImportRecord};
pub use profile::{ProfileSettings, ProfileStore, DEFAULT_PROFILE_KEY};
pub use rating::{resolve_score, stars_to_score, STAR_MIDPOINT};
pub use storage::{MemorySlots, SlotStorage, StoreError, StoreResult};
pub use uri::{issuer_uri, normalize_uri};
