//! Key-value storage for small client-side records
//!
//! The location provider keeps exactly one record (the last device fix) in a
//! string-keyed slot. [`KeyValueStore`] is the port it talks to; this module
//! ships two adapters:
//!
//! - [`MemoryStore`]: process-local, for tests and short-lived tools
//! - [`FileStore`]: one file per key under a directory, survives restarts
//!
//! # Example
//!
//! ```rust
//! use mazeed_core::store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("mazeed_user_location", r#"{"latitude":1.0}"#)?;
//! assert!(store.get("mazeed_user_location")?.is_some());
//! # Ok::<(), mazeed_core::Error>(())
//! ```

use crate::error::{Error, ErrorCode, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// String-keyed storage slot port
///
/// Writes overwrite the previous value in one step: a concurrent reader sees
/// either the old value or the new one, never a mix.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`, returning whether it was present
    ///
    /// # Errors
    /// Returns an error if the backend cannot be modified.
    fn remove(&self, key: &str) -> Result<bool>;
}

/// In-memory store guarded by a read-write lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> Error {
    Error::new(ErrorCode::Internal, "Storage lock poisoned")
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.slots.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.slots.write().map_err(|_| poisoned())?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut guard = self.slots.write().map_err(|_| poisoned())?;
        Ok(guard.remove(key).is_some())
    }
}

/// File-backed store: each key is a `<key>.json` file in one directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::from(e).with_context(format!("Creating storage directory {}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    /// Directory this store writes into
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(Error::invalid_storage_key(key));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::from(e).with_context(format!("Reading {}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;

        // Write beside the target and rename over it so readers never see a
        // partially written record.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .map_err(|e| Error::from(e.error).with_context(format!("Replacing {}", path.display())))?;

        debug!(path = %path.display(), bytes = value.len(), "Stored slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::from(e).with_context(format!("Removing {}", path.display()))),
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_memory_set_and_get() {
        let store = MemoryStore::new();
        store.set("slot", "value").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_memory_overwrite_and_remove() {
        let store = MemoryStore::new();
        store.set("slot", "first").unwrap();
        store.set("slot", "second").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("second"));

        assert!(store.remove("slot").unwrap());
        assert!(!store.remove("slot").unwrap());
        assert!(store.get("slot").unwrap().is_none());
    }

    #[test]
    fn test_file_set_and_get() {
        let (store, temp) = test_store();

        store.set("mazeed_user_location", "{\"a\":1}").unwrap();
        assert_eq!(
            store.get("mazeed_user_location").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(temp.path().join("mazeed_user_location.json").exists());
    }

    #[test]
    fn test_file_get_missing() {
        let (store, _temp) = test_store();
        assert!(store.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_file_overwrite_leaves_no_temp_files() {
        let (store, temp) = test_store();

        store.set("slot", "one").unwrap();
        store.set("slot", "two").unwrap();

        assert_eq!(store.get("slot").unwrap().as_deref(), Some("two"));
        let entries = fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_file_remove() {
        let (store, _temp) = test_store();

        store.set("to_remove", "42").unwrap();
        assert!(store.remove("to_remove").unwrap());
        assert!(store.get("to_remove").unwrap().is_none());
        assert!(!store.remove("to_remove").unwrap());
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let (store, _temp) = test_store();

        for key in ["", "../escape", "a/b", ".hidden", "spaces here"] {
            let err = store.set(key, "x").unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidStorageKey, "key {key:?}");
        }
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp = TempDir::new().unwrap();
        FileStore::new(temp.path()).unwrap().set("slot", "kept").unwrap();

        let reopened = FileStore::new(temp.path()).unwrap();
        assert_eq!(reopened.get("slot").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_concurrent_writers_last_write_wins() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.set("slot", &i.to_string()).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let value: u32 = store.get("slot").unwrap().unwrap().parse().unwrap();
        assert!(value < 8);
    }
}
