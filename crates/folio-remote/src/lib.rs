//! Remote claims API client for Folio
//!
//! Authenticated CRUD against the claims API:
//!
//! | Operation | Request |
//! |---|---|
//! | create | `POST /claims` |
//! | list by subject | `GET /claims/subject/{encoded uri}` |
//! | list by issuer | `GET /claim?issuer_id={uri}&limit=&page=` |
//! | update | `PUT /claims/{id}` |
//! | delete | `DELETE /claims/{id}` |
//!
//! Every call takes the bearer token explicitly. The client never retries
//! and never falls back to local storage; it reports typed errors and leaves
//! that policy to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_remote::{ClaimsBackend, RemoteClient, RemoteConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RemoteClient::new(RemoteConfig {
//!     base_url: "https://claims.example.org".into(),
//!     ..Default::default()
//! })?;
//!
//! let page = client.list_by_issuer("token", "42", 1, 50).await?;
//! println!("{} claims", page.claims.len());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod error;
pub mod types;

pub use backend::ClaimsBackend;
pub use client::{RemoteClient, RemoteConfig, DEFAULT_ISSUER_NAMESPACE};
pub use error::{RemoteError, Result};
pub use types::{normalize_list, CreateResponse, IssuerPage, RemoteListResponse};
