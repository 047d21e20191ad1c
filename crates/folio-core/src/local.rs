//! Local claim store
//!
//! Persists the locally owned claims as a single JSON array in one slot of a
//! [`SlotStorage`]. Reads never fail: a missing, unreadable or corrupt slot
//! is treated as an empty set. Writes rewrite the whole array in one slot
//! write, so a failed write leaves the previous array in place.

use chrono::Utc;
use tracing::{debug, warn};

use crate::claim::{Claim, ClaimInput, ClaimPatch};
use crate::storage::{SlotStorage, StoreError, StoreResult};

/// Default slot key holding the claims array.
pub const DEFAULT_CLAIMS_KEY: &str = "folio.claims";

/// Claim store backed by one slot of a [`SlotStorage`].
#[derive(Debug)]
pub struct LocalClaimStore<S> {
    slots: S,
    key: String,
}

impl<S: SlotStorage> LocalClaimStore<S> {
    /// Create a store using [`DEFAULT_CLAIMS_KEY`].
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, DEFAULT_CLAIMS_KEY)
    }

    /// Create a store using a custom slot key.
    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get a reference to the underlying slot storage.
    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// All local claims in insertion order.
    ///
    /// Degrades to an empty list when the slot is missing, the storage is
    /// unavailable, or the stored value does not parse.
    pub fn list(&self) -> Vec<Claim> {
        let raw = match self.slots.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "local storage unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Claim>>(&raw) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(key = %self.key, error = %e, "local claims corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Look up one claim by id.
    pub fn get(&self, id: i64) -> Option<Claim> {
        self.list().into_iter().find(|c| c.id == id)
    }

    /// Create a claim: normalize the input, assign a fresh id, stamp
    /// `created_at`, append and persist.
    pub fn create(&self, input: ClaimInput) -> StoreResult<Claim> {
        let mut claims = self.list();
        let now = Utc::now();

        let id = next_local_id(&claims, now.timestamp_millis())?;
        let claim = Claim::from_input(id, input.normalized(), now.to_rfc3339());

        claims.push(claim.clone());
        self.persist(&claims)?;

        debug!(id, key = %self.key, "created local claim");
        Ok(claim)
    }

    /// Apply a patch to the claim with `id`. Returns `false` (and writes
    /// nothing) if no such claim exists.
    pub fn update(&self, id: i64, patch: &ClaimPatch) -> StoreResult<bool> {
        let mut claims = self.list();
        let Some(claim) = claims.iter_mut().find(|c| c.id == id) else {
            debug!(id, "update of unknown local claim ignored");
            return Ok(false);
        };

        claim.apply_patch(patch);
        self.persist(&claims)?;
        Ok(true)
    }

    /// Remove the claim with `id`. Returns `false` (and writes nothing) if
    /// no such claim exists.
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut claims = self.list();
        let before = claims.len();
        claims.retain(|c| c.id != id);

        if claims.len() == before {
            debug!(id, "delete of unknown local claim ignored");
            return Ok(false);
        }

        self.persist(&claims)?;
        Ok(true)
    }

    /// Replace the whole claim set in a single slot write.
    pub fn replace_all(&self, claims: &[Claim]) -> StoreResult<()> {
        self.persist(claims)
    }

    /// Remove the claims slot entirely.
    pub fn clear(&self) -> StoreResult<()> {
        self.slots.remove(&self.key)?;
        Ok(())
    }

    fn persist(&self, claims: &[Claim]) -> StoreResult<()> {
        let json = serde_json::to_string(claims)?;
        self.slots.write(&self.key, &json)
    }
}

/// Next local id: the current millisecond clock, bumped past the largest
/// existing id so ids stay increasing and unique even within one millisecond.
///
/// Fails with [`StoreError::IdExhausted`] when the largest stored id is
/// already `i64::MAX`.
pub fn next_local_id(existing: &[Claim], now_ms: i64) -> StoreResult<i64> {
    let max_id = existing.iter().map(|c| c.id).max().unwrap_or(0);
    let next = max_id
        .checked_add(1)
        .ok_or(StoreError::IdExhausted { max_id })?;
    Ok(now_ms.max(next))
}
