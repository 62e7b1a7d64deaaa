use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::storage::{KeyValueStore, StorageError, StorageResult};

/// Store persisted as a single JSON object in one file. The whole map is
/// loaded at open and rewritten after every mutation, so values survive a
/// drop and reopen.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, loading existing entries when the file is
    /// already present. A missing file starts the store empty; the file is
    /// only created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(StorageError::Io(err)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> StorageResult<()> {
        let contents = serde_json::to_string(entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("store.json")).expect("open should succeed");

        let value = store.get("anything").expect("get should succeed");
        assert!(value.is_none());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        {
            let store = FileStore::open(&path).expect("open should succeed");
            store.set("cart", "[]").expect("set should succeed");
            store.set("session", "{}").expect("set should succeed");
        }

        let reopened = FileStore::open(&path).expect("reopen should succeed");
        assert_eq!(
            reopened.get("cart").expect("get should succeed").as_deref(),
            Some("[]")
        );
        assert_eq!(
            reopened
                .get("session")
                .expect("get should succeed")
                .as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn remove_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        {
            let store = FileStore::open(&path).expect("open should succeed");
            store.set("flag", "true").expect("set should succeed");
            store.remove("flag").expect("remove should succeed");
        }

        let reopened = FileStore::open(&path).expect("reopen should succeed");
        assert!(reopened.get("flag").expect("get should succeed").is_none());
    }

    #[test]
    fn open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").expect("write fixture");

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StorageError::Format(_))));
    }
}
