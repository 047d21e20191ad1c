//! Browser storage backend for Folio (WASM)
//!
//! Implements [`folio_core::SlotStorage`] on top of the Web Storage API, so
//! the local claims array and the profile settings live in the page's
//! `localStorage` exactly where the web front end expects them.
//!
//! The `browser` module exposes the local-only operations (list, import,
//! analytics, normalizers) to JavaScript through wasm-bindgen. Remote calls
//! stay on the JavaScript side.
//!
//! # Example
//!
//! ```rust,ignore
//! use folio_core::{ClaimBuilder, LocalClaimStore};
//! use folio_web::BrowserSlots;
//!
//! let store = LocalClaimStore::new(BrowserSlots::local()?);
//! store.create(
//!     ClaimBuilder::new()
//!         .subject("example.com/alice")
//!         .claim_type("HAS_SKILL")
//!         .build(),
//! )?;
//! ```

pub mod browser;
pub mod error;
pub mod storage;

pub use error::{Result, WebStorageError};
pub use storage::BrowserSlots;
