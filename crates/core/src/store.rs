//! Injectable key-value storage for session data
//!
//! Values are JSON documents addressed by string keys. The store is created
//! once at startup and handed to whoever needs it; nothing here is global.
//!
//! # Example
//!
//! ```rust
//! use campus_nav_core::store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set_json("last_destination", &"library").unwrap();
//!
//! let value: Option<String> = store.get_json("last_destination").unwrap();
//! assert_eq!(value.as_deref(), Some("library"));
//! ```

use crate::error::{Error, ErrorCode, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// String-keyed JSON value storage.
pub trait KeyValueStore {
    /// Read a raw value
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove a value, returning whether it existed
    fn remove(&self, key: &str) -> Result<bool>;

    /// All keys in sorted order
    fn keys(&self) -> Result<Vec<String>>;

    /// Read and deserialize a value
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        self.set(key, serde_json::to_value(value)?)
    }
}

fn poisoned() -> Error {
    Error::new(ErrorCode::Internal, "Failed to acquire store lock")
}

/// In-process store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        guard.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        Ok(guard.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        let mut keys: Vec<String> = guard.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Store persisted as a single JSON object on disk.
///
/// The file is read once on open and rewritten on every mutation through a
/// sibling temp file and a rename, so readers never see a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<Map<String, Value>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&content)? {
                    Value::Object(map) => map,
                    _ => return Err(Error::storage_corrupted(&path)),
                }
            }
        } else {
            Map::new()
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Default location under the user data directory
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("campus-nav")
            .join("session.json")
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let write = || -> Result<()> {
            fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        };

        let written = write();
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    // Mutations go to disk first; memory only changes once the write landed.
    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        let mut next = guard.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        if !guard.contains_key(key) {
            return Ok(false);
        }
        let mut next = guard.clone();
        next.remove(key);
        self.persist(&next)?;
        *guard = next;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        let mut keys: Vec<String> = guard.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_set_and_get() {
        let store = MemoryStore::new();
        store.set("user", json!({"name": "Asha"})).unwrap();

        assert_eq!(store.get("user").unwrap(), Some(json!({"name": "Asha"})));
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_memory_remove() {
        let store = MemoryStore::new();
        store.set_json("count", &3u32).unwrap();

        assert!(store.remove("count").unwrap());
        assert!(!store.remove("count").unwrap());
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemoryStore::new();
        store.set("b", json!(1)).unwrap();
        store.set("a", json!(2)).unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_file_store_persists_across_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set_json("last_destination", &"7").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        let value: Option<String> = reopened.get_json("last_destination").unwrap();
        assert_eq!(value.as_deref(), Some("7"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageCorrupted);
    }

    #[test]
    fn test_file_store_empty_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path).unwrap();
        store.set("kept", json!(1)).unwrap();

        // A directory where the file should be makes the rename fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set("lost", json!(2)).is_err());
        assert!(store.remove("kept").is_err());

        assert_eq!(store.keys().unwrap(), vec!["kept".to_string()]);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
