//! Durable key-value storage for history lists.
//!
//! A history store persists one string value per key. This module provides
//! the [`DurableStorage`] trait and two backends:
//!
//! - [`FileStorage`] - one JSON file per key under a root directory
//! - [`MemoryStorage`] - in-process map with optional quota, for tests and
//!   embedding

pub mod file;
pub mod memory;

use std::rc::Rc;
use std::sync::Arc;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Result type for storage backends.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// A persistent string key-value store.
///
/// Methods take `&self` so one backend can be shared by several history
/// stores. Backends are responsible for making each individual call atomic.
pub trait DurableStorage {
    /// Read the value under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// List every key currently holding a value, sorted.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Check whether `key` currently holds a value.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: DurableStorage + ?Sized> DurableStorage for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}

impl<S: DurableStorage + ?Sized> DurableStorage for Rc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}

impl<S: DurableStorage + ?Sized> DurableStorage for Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}
