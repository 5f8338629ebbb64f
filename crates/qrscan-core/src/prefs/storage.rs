/// Key-value storage backends for the preference store.
use crate::error::StorageError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// String-keyed, string-valued persistent storage.
///
/// Synchronous and best-effort; no transactional guarantees.
pub trait KeyValueStorage: Send + Sync {
    /// Read a raw value. `Ok(None)` when the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Write a raw value, replacing any previous one.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage. Lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A JSON object on disk, cached in memory.
///
/// The file is loaded once on open. Every write rewrites the whole file
/// through a temporary sibling and a rename so a crash never leaves a
/// half-written store behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file starts empty. A corrupt file is logged and also starts
    /// empty; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => {
                debug!("Loaded {} preference(s) from {}", entries.len(), path.display());
                entries
            }
            Err(e) => {
                warn!("Ignoring unreadable preference file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

fn persist_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_owned(), value.to_owned());
        if let Err(e) = persist_entries(&self.path, &entries) {
            // Keep memory and disk in step: undo the in-memory change.
            match previous {
                Some(old) => entries.insert(key.to_owned(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_roundtrip() {
        let s = MemoryStorage::new();
        assert_eq!(s.read("k").unwrap(), None);
        s.write("k", "v").unwrap();
        assert_eq!(s.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("prefs.json");
        FileStorage::open(&path).write("a", "1").unwrap();
        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.read("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        let s = FileStorage::open(&path);
        assert_eq!(s.read("a").unwrap(), None);
        s.write("a", "2").unwrap();
        assert_eq!(FileStorage::open(&path).read("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = tmp.path().join("prefs.json");
        fs::create_dir_all(&path).unwrap();
        let s = FileStorage::open(&path);
        assert!(s.write("a", "1").is_err());
        assert_eq!(s.read("a").unwrap(), None);
    }
}
