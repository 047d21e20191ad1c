//! Backend trait the mode resolver dispatches remote operations to

use std::sync::Arc;

use async_trait::async_trait;
use folio_core::{Claim, ClaimInput, ClaimPatch};

use crate::error::Result;
use crate::types::IssuerPage;

/// Remote claim operations, each authenticated by an explicit bearer token.
///
/// [`crate::RemoteClient`] is the HTTP implementation; tests and offline
/// builds can substitute their own.
#[async_trait]
pub trait ClaimsBackend: Send + Sync {
    /// Create a claim. Implementations normalize the subject and derive the
    /// score before sending.
    async fn create(&self, token: &str, input: &ClaimInput) -> Result<Claim>;

    /// All claims about `subject`.
    async fn list_by_subject(&self, token: &str, subject: &str) -> Result<Vec<Claim>>;

    /// One page of claims issued by `user_id`.
    async fn list_by_issuer(
        &self,
        token: &str,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<IssuerPage>;

    async fn update(&self, token: &str, id: i64, patch: &ClaimPatch) -> Result<()>;

    async fn delete(&self, token: &str, id: i64) -> Result<()>;
}

#[async_trait]
impl<T: ClaimsBackend + ?Sized> ClaimsBackend for Arc<T> {
    async fn create(&self, token: &str, input: &ClaimInput) -> Result<Claim> {
        (**self).create(token, input).await
    }

    async fn list_by_subject(&self, token: &str, subject: &str) -> Result<Vec<Claim>> {
        (**self).list_by_subject(token, subject).await
    }

    async fn list_by_issuer(
        &self,
        token: &str,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<IssuerPage> {
        (**self).list_by_issuer(token, user_id, page, limit).await
    }

    async fn update(&self, token: &str, id: i64, patch: &ClaimPatch) -> Result<()> {
        (**self).update(token, id, patch).await
    }

    async fn delete(&self, token: &str, id: i64) -> Result<()> {
        (**self).delete(token, id).await
    }
}
