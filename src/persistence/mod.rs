//! Best score persistence
//!
//! The game persists exactly one value: the best score, stored as a
//! stringified integer under `bestScore`. Storage is injected through
//! [`KeyValueStore`] so the engine never touches a concrete backend.
//!
//! Backends:
//! - [`MemoryStore`]: in-process map (tests, headless sessions)
//! - [`FileStore`]: JSON object on disk (native only)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32 only)

mod best_score;
#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

use std::collections::HashMap;

use thiserror::Error;

pub use best_score::{load_best_score, parse_best_score, save_best_score};
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Errors raised by a store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("value {value:?} stored under {key:?} is not a valid score")]
    InvalidValue { key: String, value: String },
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage capability
pub trait KeyValueStore {
    /// Read a value, `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("bestScore").unwrap().is_none());
        store.set("bestScore", "12").unwrap();
        assert_eq!(store.get("bestScore").unwrap().as_deref(), Some("12"));
        store.set("bestScore", "30").unwrap();
        assert_eq!(store.get("bestScore").unwrap().as_deref(), Some("30"));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
