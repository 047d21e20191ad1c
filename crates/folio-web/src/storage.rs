//! Web Storage backend implementing the SlotStorage trait.
//!
//! `localStorage` is synchronous, so unlike IndexedDB this maps one-to-one
//! onto the synchronous trait. `setItem` replaces a value atomically; a
//! rejected write leaves the old value in place.

use folio_core::{SlotStorage, StoreError};
use web_sys::Storage;

use crate::error::WebStorageError;

type StoreResult<T> = std::result::Result<T, StoreError>;

/// Slot storage over a browser `Storage` object.
///
/// Not `Send`: browser handles belong to the thread that created them.
/// Share one instance with `Rc` or by reference.
#[derive(Debug, Clone)]
pub struct BrowserSlots {
    storage: Storage,
}

impl BrowserSlots {
    /// Wrap an existing `Storage` object.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The window's `localStorage`.
    pub fn local() -> crate::Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WebStorageError::NotAvailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|_| WebStorageError::NotAvailable("localStorage access denied".into()))?
            .ok_or_else(|| WebStorageError::NotAvailable("localStorage is null".into()))?;
        Ok(Self::new(storage))
    }

    /// The window's `sessionStorage` (cleared when the tab closes).
    pub fn session() -> crate::Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WebStorageError::NotAvailable("no window".into()))?;
        let storage = window
            .session_storage()
            .map_err(|_| WebStorageError::NotAvailable("sessionStorage access denied".into()))?
            .ok_or_else(|| WebStorageError::NotAvailable("sessionStorage is null".into()))?;
        Ok(Self::new(storage))
    }
}

impl SlotStorage for BrowserSlots {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::from(WebStorageError::from(e)))
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::from(WebStorageError::from_write(e, key, value.len())))
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        if self.read(key)?.is_none() {
            return Ok(false);
        }
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::from(WebStorageError::from(e)))?;
        Ok(true)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let len = self
            .storage
            .length()
            .map_err(|e| StoreError::from(WebStorageError::from(e)))?;

        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self
                .storage
                .key(index)
                .map_err(|e| StoreError::from(WebStorageError::from(e)))?
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}
