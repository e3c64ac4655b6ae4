//! String key-value persistence.
//!
//! The registry persists through the [`KeyValueStore`] trait. [`FileStore`]
//! keeps every key in one JSON object on disk; [`MemoryStore`] is used by
//! tests and whenever nothing should touch the filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SqaError};

/// Key under which the project collection is stored (JSON array).
pub const PROJECTS_KEY: &str = "projects";

/// Key under which the active project ID is stored (plain string).
pub const ACTIVE_PROJECT_KEY: &str = "activeProjectId";

/// Minimal string-to-string store.
pub trait KeyValueStore {
    /// Read a key. A missing key is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every `set` rewrites the whole file via write-to-temp + rename. A missing
/// file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(SqaError::Io(e)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            SqaError::Storage(format!("{} is not a valid store file: {e}", self.path.display()))
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        serde_json::to_writer_pretty(&mut file, entries)?;
        writeln!(file)?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get(PROJECTS_KEY).unwrap().is_none());
        store.set(PROJECTS_KEY, "[]").unwrap();
        store.set(PROJECTS_KEY, "[1]").unwrap();
        assert_eq!(store.get(PROJECTS_KEY).unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        assert!(store.get(ACTIVE_PROJECT_KEY).unwrap().is_none());
    }

    #[test]
    fn file_store_persists_keys_independently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = FileStore::new(&path);
        store.set(PROJECTS_KEY, "[]").unwrap();
        store.set(ACTIVE_PROJECT_KEY, "prj-1").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(PROJECTS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get(ACTIVE_PROJECT_KEY).unwrap().as_deref(), Some("prj-1"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.get(PROJECTS_KEY), Err(SqaError::Storage(_))));
        assert!(store.set(PROJECTS_KEY, "[]").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }
}
