//! String key-value stores.
//!
//! The game persists JSON-encoded records under string keys, the way a
//! browser's local storage works. Two backends are provided:
//!
//! - `MemoryStore`: a plain map, used by tests and embedders
//! - `FileStore`: one JSON object on disk, rewritten on every change

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::error::StoreError;

/// A local key-value store holding JSON strings.
///
/// Writes replace the whole value; there is no merge and no versioning at
/// this level.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete a value, returning the previous one.
    fn remove(&mut self, key: &str) -> Result<Option<String>, StoreError>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the store empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.remove(key))
    }
}

/// Store persisted as a single JSON object file.
///
/// The file is read once on open and rewritten (via a temporary file and
/// rename) after every `set` or `remove`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is logged and treated as empty; it is replaced on the next
    /// write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring unreadable store file");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&tmp, raw).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        let previous = self.entries.remove(key);
        if previous.is_some() {
            self.flush()?;
        }
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("k"), None);

        store.set("k", "1".into()).unwrap();
        store.set("k", "2".into()).unwrap();
        assert_eq!(store.get("k").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.remove("k").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            assert_eq!(store.get("a"), None);
            store.set("a", r#"{"score":1}"#.into()).unwrap();
            store.set("b", "x".into()).unwrap();
            store.remove("b").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("a").as_deref(), Some(r#"{"score":1}"#));
        assert_eq!(reopened.get("b"), None);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_file_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("a"), None);

        store.set("a", "1".into()).unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("a").as_deref(), Some("1"));
    }

    #[test]
    fn test_file_store_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        let err = store.set("a", "1".into()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
