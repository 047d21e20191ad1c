//! Mode resolver
//!
//! [`ClaimsService`] decides, per operation, whether claims come from the
//! remote API or from local slot storage:
//!
//! 1. A session is remote eligible when it is authenticated, holds a token
//!    that is neither empty nor the local-only token, and has an issuer id.
//! 2. Eligible sessions get exactly one remote attempt.
//! 3. Ineligible sessions, and reads whose remote attempt failed, get
//!    exactly one local attempt. Nothing is retried.
//!
//! Writes follow the provenance of the last load, so ids from a remote set
//! are only ever sent back to the remote API and local ids stay local.

mod confirm;
mod error;

pub use confirm::{Confirmation, ConfirmationRequest, PendingAction, Step};
pub use error::SyncError;

use folio_core::{
    import_batch, normalize_uri, parse_batch, summarize, Claim, ClaimInput, ClaimPatch,
    ExportDocument, ImportOutcome, LocalClaimStore, PortfolioSummary, SlotStorage,
};
use folio_remote::{ClaimsBackend, RemoteError};
use tracing::{debug, info, warn};

use crate::config::{FolioConfig, DEFAULT_PAGE_LIMIT};
use crate::session::{Session, DEFAULT_LOCAL_ONLY_TOKEN};
use crate::tracing::prefix;

/// Upper bound on issuer pages fetched by one load
pub const MAX_ISSUER_PAGES: u32 = 100;

/// Where a claim set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Backend,
    Local,
}

/// Why a load was served from local storage
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The session may not use the backend
    NotEligible,
    /// The one remote attempt failed
    RemoteFailed(RemoteError),
}

/// Result of a load. Always produced, even when every source failed, so a
/// fallback can be told apart from a genuinely empty remote result.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedClaims {
    pub claims: Vec<Claim>,
    pub provenance: Provenance,
    /// Set whenever `provenance` is `Local`
    pub fallback: Option<FallbackReason>,
}

impl LoadedClaims {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// The currently exposed claim set together with its provenance and summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub claims: Vec<Claim>,
    pub provenance: Provenance,
    pub summary: PortfolioSummary,
}

/// An export document and where its claims came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimsExport {
    pub document: ExportDocument,
    /// `None` when nothing had been loaded
    pub provenance: Option<Provenance>,
}

#[derive(Debug)]
struct Current {
    claims: Vec<Claim>,
    provenance: Provenance,
}

enum WriteTarget<'a> {
    Remote(&'a str),
    Local,
}

/// Claim operations with remote/local resolution and fallback.
pub struct ClaimsService<B, S> {
    backend: B,
    local: LocalClaimStore<S>,
    local_only_token: String,
    page_limit: u32,
    current: Option<Current>,
}

impl<B: ClaimsBackend, S: SlotStorage> ClaimsService<B, S> {
    pub fn new(backend: B, local: LocalClaimStore<S>) -> Self {
        Self {
            backend,
            local,
            local_only_token: DEFAULT_LOCAL_ONLY_TOKEN.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            current: None,
        }
    }

    /// Apply the resolver settings from a configuration.
    pub fn with_config(self, config: &FolioConfig) -> Self {
        self.with_local_only_token(config.local_only_token.clone())
            .with_page_limit(config.page_limit)
    }

    pub fn with_local_only_token(mut self, token: impl Into<String>) -> Self {
        self.local_only_token = token.into();
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn local(&self) -> &LocalClaimStore<S> {
        &self.local
    }

    /// Provenance of the last load, if any.
    pub fn provenance(&self) -> Option<Provenance> {
        self.current.as_ref().map(|c| c.provenance)
    }

    /// Where operations for `session` go when nothing has been loaded yet.
    pub fn mode(&self, session: &Session) -> Provenance {
        if session.is_remote_eligible(&self.local_only_token) {
            Provenance::Backend
        } else {
            Provenance::Local
        }
    }

    /// Load the session's claims: every claim it issued, paged from the
    /// backend, or the local set.
    ///
    /// The paged fetch counts as the one remote attempt. A failure on any
    /// page discards the pages already fetched and falls back to local.
    pub async fn load_claims(&mut self, session: &Session) -> LoadedClaims {
        let loaded = match session.remote_credentials(&self.local_only_token) {
            Some((token, issuer)) => match self.fetch_issued(token, issuer).await {
                Ok(claims) => {
                    info!("{} loaded {} claims from backend", prefix::REMOTE, claims.len());
                    LoadedClaims {
                        claims,
                        provenance: Provenance::Backend,
                        fallback: None,
                    }
                }
                Err(e) => {
                    warn!("{} backend load failed, using local claims: {}", prefix::FALLBACK, e);
                    self.load_local(FallbackReason::RemoteFailed(e))
                }
            },
            None => self.load_local(FallbackReason::NotEligible),
        };

        self.current = Some(Current {
            claims: loaded.claims.clone(),
            provenance: loaded.provenance,
        });
        loaded
    }

    async fn fetch_issued(&self, token: &str, issuer: &str) -> Result<Vec<Claim>, RemoteError> {
        let mut claims = Vec::new();
        for page in 1..=MAX_ISSUER_PAGES {
            let fetched = self
                .backend
                .list_by_issuer(token, issuer, page, self.page_limit)
                .await?;
            debug!(
                page,
                count = fetched.claims.len(),
                total = ?fetched.total,
                "fetched issuer page"
            );

            let more = fetched.has_more() && !fetched.claims.is_empty();
            claims.extend(fetched.claims);
            if !more {
                return Ok(claims);
            }
        }
        warn!(
            "{} stopped after {} pages with {} claims, the rest are not loaded",
            prefix::REMOTE,
            MAX_ISSUER_PAGES,
            claims.len()
        );
        Ok(claims)
    }

    /// Claims about one subject. Does not replace the loaded set.
    pub async fn load_by_subject(&self, session: &Session, subject: &str) -> LoadedClaims {
        let reason = match session.remote_credentials(&self.local_only_token) {
            Some((token, _)) => match self.backend.list_by_subject(token, subject).await {
                Ok(claims) => {
                    return LoadedClaims {
                        claims,
                        provenance: Provenance::Backend,
                        fallback: None,
                    }
                }
                Err(e) => {
                    warn!("{} subject lookup failed, using local claims: {}", prefix::FALLBACK, e);
                    FallbackReason::RemoteFailed(e)
                }
            },
            None => FallbackReason::NotEligible,
        };

        let subject = normalize_uri(subject);
        let mut loaded = self.load_local(reason);
        loaded.claims.retain(|c| c.subject == subject);
        loaded
    }

    /// Create a claim where the current set lives.
    ///
    /// A failed remote create is reported as [`SyncError::RemoteWrite`] with
    /// `local_fallback_available` set; the caller decides whether to follow
    /// up with [`ClaimsService::create_claim_locally`].
    pub async fn create_claim(
        &mut self,
        session: &Session,
        input: ClaimInput,
    ) -> Result<Claim, SyncError> {
        match self.write_target(session)? {
            WriteTarget::Remote(token) => {
                let claim = self.backend.create(token, &input).await.map_err(|source| {
                    warn!("{} remote create failed: {}", prefix::REMOTE, source);
                    SyncError::RemoteWrite {
                        source,
                        local_fallback_available: true,
                    }
                })?;
                info!("{} created claim {}", prefix::REMOTE, claim.id);
                self.record_created(Provenance::Backend, &claim);
                Ok(claim)
            }
            WriteTarget::Local => self.create_claim_locally(input),
        }
    }

    /// Create a claim in local storage regardless of the session.
    pub fn create_claim_locally(&mut self, input: ClaimInput) -> Result<Claim, SyncError> {
        let claim = self.local.create(input)?;
        info!("{} created claim {}", prefix::LOCAL, claim.id);
        self.record_created(Provenance::Local, &claim);
        Ok(claim)
    }

    /// Apply a patch to a claim of the current set. Returns `false` when a
    /// local claim with `id` does not exist.
    pub async fn update_claim(
        &mut self,
        session: &Session,
        id: i64,
        patch: &ClaimPatch,
    ) -> Result<bool, SyncError> {
        let found = match self.write_target(session)? {
            WriteTarget::Remote(token) => {
                self.backend
                    .update(token, id, patch)
                    .await
                    .map_err(|source| SyncError::RemoteWrite {
                        source,
                        local_fallback_available: false,
                    })?;
                info!("{} updated claim {}", prefix::REMOTE, id);
                true
            }
            WriteTarget::Local => {
                let found = self.local.update(id, patch)?;
                if found {
                    info!("{} updated claim {}", prefix::LOCAL, id);
                }
                found
            }
        };

        if found {
            let loaded = self
                .current_claims_mut()
                .and_then(|claims| claims.iter_mut().find(|c| c.id == id));
            if let Some(claim) = loaded {
                claim.apply_patch(patch);
            }
        }
        Ok(found)
    }

    /// Delete a claim of the current set, after confirmation.
    ///
    /// `Done(false)` means no local claim with `id` existed.
    pub async fn delete_claim(
        &mut self,
        session: &Session,
        id: i64,
        confirmation: Confirmation,
    ) -> Result<Step<bool>, SyncError> {
        match confirmation {
            Confirmation::Pending => {
                let statement = self
                    .current
                    .as_ref()
                    .and_then(|c| c.claims.iter().find(|claim| claim.id == id))
                    .map(|claim| claim.statement.as_str());
                return Ok(Step::ConfirmationRequired(ConfirmationRequest::delete(
                    id, statement,
                )));
            }
            Confirmation::Declined => {
                debug!(id, "delete declined");
                return Ok(Step::Cancelled);
            }
            Confirmation::Confirmed => {}
        }

        let removed = match self.write_target(session)? {
            WriteTarget::Remote(token) => {
                self.backend
                    .delete(token, id)
                    .await
                    .map_err(|source| SyncError::RemoteWrite {
                        source,
                        local_fallback_available: false,
                    })?;
                info!("{} deleted claim {}", prefix::REMOTE, id);
                true
            }
            WriteTarget::Local => {
                let removed = self.local.delete(id)?;
                if removed {
                    info!("{} deleted claim {}", prefix::LOCAL, id);
                }
                removed
            }
        };

        if let Some(claims) = self.current_claims_mut() {
            claims.retain(|c| c.id != id);
        }
        Ok(Step::Done(removed))
    }

    /// Import a JSON batch into local storage, after confirmation.
    ///
    /// The payload is validated before confirmation is requested, so an
    /// invalid file is rejected without asking and without writing.
    pub fn import_claims(
        &mut self,
        raw: &str,
        confirmation: Confirmation,
    ) -> Result<Step<ImportOutcome>, SyncError> {
        match confirmation {
            Confirmation::Pending => {
                let records = parse_batch(raw)?;
                return Ok(Step::ConfirmationRequired(ConfirmationRequest::import(
                    records.len(),
                )));
            }
            Confirmation::Declined => return Ok(Step::Cancelled),
            Confirmation::Confirmed => {}
        }

        let outcome = import_batch(&self.local, raw)?;
        info!(
            "{} imported {} claims ({} total)",
            prefix::BATCH,
            outcome.imported.len(),
            outcome.total
        );

        if let Some(current) = self.current.as_mut() {
            if current.provenance == Provenance::Local {
                current.claims.extend(outcome.imported.iter().cloned());
            }
        }
        Ok(Step::Done(outcome))
    }

    /// The currently loaded set, if a load has happened.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.current.as_ref().map(|current| Snapshot {
            claims: current.claims.clone(),
            provenance: current.provenance,
            summary: summarize(&current.claims),
        })
    }

    /// Export the currently loaded set, dated today, with the provenance
    /// of that set. Empty and without provenance before any load.
    pub fn export(&self) -> ClaimsExport {
        let (claims, provenance) = match &self.current {
            Some(current) => (current.claims.clone(), Some(current.provenance)),
            None => (Vec::new(), None),
        };
        debug!("{} exporting {} claims", prefix::BATCH, claims.len());
        ClaimsExport {
            document: ExportDocument::today(claims),
            provenance,
        }
    }

    fn load_local(&self, reason: FallbackReason) -> LoadedClaims {
        let claims = self.local.list();
        info!("{} loaded {} local claims", prefix::LOCAL, claims.len());
        LoadedClaims {
            claims,
            provenance: Provenance::Local,
            fallback: Some(reason),
        }
    }

    fn write_target<'s>(&self, session: &'s Session) -> Result<WriteTarget<'s>, SyncError> {
        let credentials = session.remote_credentials(&self.local_only_token);
        let provenance = self.provenance().unwrap_or(if credentials.is_some() {
            Provenance::Backend
        } else {
            Provenance::Local
        });

        match (provenance, credentials) {
            (Provenance::Local, _) => Ok(WriteTarget::Local),
            (Provenance::Backend, Some((token, _))) => Ok(WriteTarget::Remote(token)),
            (Provenance::Backend, None) => Err(SyncError::NotEligible),
        }
    }

    fn current_claims_mut(&mut self) -> Option<&mut Vec<Claim>> {
        self.current.as_mut().map(|c| &mut c.claims)
    }

    fn record_created(&mut self, provenance: Provenance, claim: &Claim) {
        if let Some(current) = self.current.as_mut() {
            if current.provenance == provenance {
                current.claims.push(claim.clone());
            }
        }
    }
}
