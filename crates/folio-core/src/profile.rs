//! Profile settings slot
//!
//! Display name and bio live next to the claims array in the same slot
//! storage, under their own key.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{SlotStorage, StoreResult};

/// Default slot key holding the profile settings.
pub const DEFAULT_PROFILE_KEY: &str = "folio.profile";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSettings {
    pub display_name: String,
    pub bio: String,
}

/// Profile settings backed by one slot of a [`SlotStorage`].
#[derive(Debug)]
pub struct ProfileStore<S> {
    slots: S,
    key: String,
}

impl<S: SlotStorage> ProfileStore<S> {
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, DEFAULT_PROFILE_KEY)
    }

    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored settings, or defaults when missing or unreadable.
    pub fn load(&self) -> ProfileSettings {
        match self.slots.read(&self.key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key = %self.key, error = %e, "profile settings corrupt, using defaults");
                ProfileSettings::default()
            }),
            Ok(None) => ProfileSettings::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "profile settings unreadable, using defaults");
                ProfileSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &ProfileSettings) -> StoreResult<()> {
        let json = serde_json::to_string(settings)?;
        self.slots.write(&self.key, &json)
    }

    pub fn clear(&self) -> StoreResult<bool> {
        self.slots.remove(&self.key)
    }
}
