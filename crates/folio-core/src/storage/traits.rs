//! Storage trait definitions

use std::rc::Rc;
use std::sync::Arc;

use crate::storage::error::StoreResult;

/// A flat string key/value store, the shape of browser `localStorage`.
///
/// Methods take `&self`; implementations use interior mutability so one
/// storage handle can back several stores (claims and profile settings share
/// the same mechanism under different keys).
pub trait SlotStorage {
    /// Read the value stored under `key`, `None` if the slot is empty.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key` in a single write.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a slot. Returns `true` if it existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// All occupied keys, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Check if a slot is occupied.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

impl<T: SlotStorage + ?Sized> SlotStorage for &T {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}

impl<T: SlotStorage + ?Sized> SlotStorage for Arc<T> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}

// Browser handles are not Send; Rc lets WASM callers share one storage.
impl<T: SlotStorage + ?Sized> SlotStorage for Rc<T> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}
