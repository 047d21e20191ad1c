//! SQLite slot storage for Folio
//!
//! Native stand-in for browser `localStorage`: a single `slots` table mapping
//! string keys to string values, implementing [`folio_core::SlotStorage`].
//! Desktop and CLI builds keep their local claims and profile settings here.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_core::{ClaimBuilder, LocalClaimStore};
//! use folio_sqlite::SqliteSlots;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let slots = SqliteSlots::open("folio.db")?;
//! let store = LocalClaimStore::new(slots);
//!
//! store.create(
//!     ClaimBuilder::new()
//!         .subject("example.com/alice")
//!         .claim_type("HAS_SKILL")
//!         .statement("Rust")
//!         .effective_date("2024-01-01")
//!         .build(),
//! )?;
//! assert_eq!(store.list().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod migrate;
pub mod store;

// Re-export main types
pub use error::{Result, SqliteError};
pub use store::SqliteSlots;
