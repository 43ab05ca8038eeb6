//! Best-effort key-value storage for the dashboard session.
//!
//! Values are plain strings; callers serialize structured data to JSON before
//! storing it. Stores never report write failures to the caller: an unwritable
//! store simply means nothing survives the session, which is logged and tolerated.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use ticker_common::Result;

/// String key-value storage in the spirit of browser local storage.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
    /// Removes `key`. Missing keys are ignored.
    fn remove(&mut self, key: &str);
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Store kept as a single JSON object on disk, rewritten after every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store. An unreadable or malformed file is
    /// logged and also treated as empty; it is overwritten on the next write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable session store {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        debug!("Opened session store {} ({} keys)", path.display(), entries.len());

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        match fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            warn!("Failed to write session store {}: {}", self.path.display(), e);
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist_or_warn();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist_or_warn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);

        store.set("a", "1");
        store.set("a", "2");
        assert_eq!(store.get("a").as_deref(), Some("2"));

        store.remove("a");
        store.remove("missing");
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(&path);
        store.set("userEmail", "trader@example.com");
        store.set("subscribedStocks", r#"["GOOG"]"#);
        store.remove("subscribedStocks");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("userEmail").as_deref(), Some("trader@example.com"));
        assert_eq!(reopened.get("subscribedStocks"), None);
    }

    #[test]
    fn test_file_store_malformed_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get("userEmail"), None);

        store.set("userEmail", "a@b.c");
        assert_eq!(JsonFileStore::open(&path).get("userEmail").as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_file_store_unwritable_is_tolerated() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in place of the file makes every write fail.
        let path = temp_dir.path().join("store.json");
        fs::create_dir(&path).unwrap();

        let mut store = JsonFileStore::open(&path);
        store.set("userEmail", "a@b.c");
        assert_eq!(store.get("userEmail").as_deref(), Some("a@b.c"));
    }
}
