//! In-memory slot storage
//!
//! A simple map-based implementation for testing and development.
//! Not suitable for production use due to lack of persistence.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::traits::SlotStorage;

/// In-memory slot storage.
///
/// Can be configured with a total byte quota (mirroring the browser's
/// `QuotaExceededError`) or as unavailable (mirroring a context without
/// storage), which makes it useful for exercising failure paths.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
    unavailable: bool,
}

impl MemorySlots {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory storage whose values may not exceed `bytes` in total.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Create a storage that fails every operation, like a browser with
    /// storage disabled.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Create a memory storage with initial slots.
    pub fn with_slots<K, V>(slots: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        {
            let mut map = store.slots.lock();
            for (key, value) in slots {
                map.insert(key.into(), value.into());
            }
        }
        store
    }

    /// Total bytes currently stored across all values.
    pub fn used_bytes(&self) -> usize {
        self.slots.lock().values().map(String::len).sum()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory slots disabled".into()));
        }
        Ok(())
    }
}

impl SlotStorage for MemorySlots {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_available()?;
        Ok(self.slots.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut slots = self.slots.lock();

        if let Some(limit) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if others + value.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        self.check_available()?;
        Ok(self.slots.lock().remove(key).is_some())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        self.check_available()?;
        Ok(self.slots.lock().keys().cloned().collect())
    }
}
