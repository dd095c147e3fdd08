//! JSON file store for native builds
//!
//! The file holds a flat JSON object of string values. Writes go to a
//! sibling `.tmp` file first and are renamed over the original.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

/// Key-value store backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dodge_ball_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_none() {
        let store = FileStore::new(scratch_path("missing"));
        assert!(store.get("bestScore").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let path = scratch_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.set("bestScore", "8").unwrap();
        store.set("other", "x").unwrap();
        store.set("bestScore", "15").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("bestScore").unwrap().as_deref(), Some("15"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let path = scratch_path("corrupt");
        std::fs::write(&path, "not json at all").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("bestScore"), Err(StoreError::Json(_))));
        let _ = std::fs::remove_file(&path);
    }
}
