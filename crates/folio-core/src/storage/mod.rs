//! Slot storage abstraction
//!
//! Folio keeps local data the way a browser keeps `localStorage`: a flat map
//! of string keys to serialized string values. The `SlotStorage` trait
//! abstracts over where that map lives:
//!
//! - **Memory**: in-process map for tests and ephemeral sessions (`MemorySlots`)
//! - **SQLite**: native on-disk key/value table (`folio-sqlite` crate)
//! - **localStorage**: the browser's own storage (`folio-web` crate, WASM only)
//!
//! # Example
//!
//! ```rust
//! use folio_core::storage::{MemorySlots, SlotStorage};
//!
//! let slots = MemorySlots::new();
//! slots.write("folio.claims", "[]").unwrap();
//! assert_eq!(slots.read("folio.claims").unwrap().as_deref(), Some("[]"));
//! ```

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemorySlots;
pub use traits::SlotStorage;
