//! Claim types - the core data model of Folio
//!
//! A claim is a single achievement record: who it is about (`subject`),
//! what kind of assertion it is (`claim_type`), a free-text statement, when
//! it happened, an optional star rating with its derived score, and an
//! optional category (`aspect`).
//!
//! # Example
//!
//! ```rust
//! use folio_core::claim::{Claim, ClaimBuilder};
//!
//! let input = ClaimBuilder::new()
//!     .subject("example.com/alice")
//!     .claim_type("COMPLETED_PROJECT")
//!     .statement("Shipped the sync layer")
//!     .effective_date("2024-03-01")
//!     .stars(4)
//!     .aspect("project")
//!     .build();
//!
//! let claim = Claim::from_input(1, input.normalized(), "2024-03-02T10:00:00+00:00");
//! assert_eq!(claim.subject, "https://example.com/alice");
//! assert_eq!(claim.score, Some(0.6));
//! ```

mod types;

pub use types::{Claim, ClaimBuilder, ClaimInput, ClaimPatch, HowKnown};
