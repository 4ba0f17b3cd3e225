//! JSON-file backed key-value store.

use crate::kv::KeyValueStore;
use jobtrail_core::StorageError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-value store persisted as a single JSON object on disk.
///
/// The file is read once on open; every write rewrites the whole file.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. So is a file that does not parse;
    /// it is overwritten by the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FileStoreError> {
        let path = path.into();
        let entries = match load(&path) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(FileStoreError::Serde(err)) => {
                tracing::warn!(path = %path.display(), error = %err, "Ignoring unreadable local store");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened local store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        save(&self.path, entries).map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush(key, &entries) {
            restore(&mut entries, key, previous);
            return Err(err);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.flush(key, &entries) {
            entries.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(())
    }
}

/// Undo an in-memory change whose flush failed.
fn restore(entries: &mut BTreeMap<String, String>, key: &str, previous: Option<String>) {
    match previous {
        Some(value) => entries.insert(key.to_string(), value),
        None => entries.remove(key),
    };
}

fn load(path: &Path) -> Result<Option<BTreeMap<String, String>>, FileStoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let entries = serde_json::from_str::<BTreeMap<String, String>>(&contents)?;
    Ok(Some(entries))
}

fn save(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), FileStoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, contents)?;
    Ok(())
}
