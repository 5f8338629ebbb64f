/// Preference store -- typed get/set over a [`KeyValueStorage`].
///
/// Values are serialized as JSON text. Every failure is logged and
/// swallowed: `get` falls back to the caller's default and `set` becomes a
/// no-op, so callers never see a storage error.
pub mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Persisted scan mode.
pub const KEY_SCAN_MODE: &str = "qrScanner_scanMode";
/// Last camera device the user picked.
pub const KEY_CAMERA_ID: &str = "qrScanner_cameraId";
/// Most recent successfully decoded text.
pub const KEY_LAST_RESULT: &str = "qrScanner_lastResult";

/// Best-effort typed preference store.
#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// A store that forgets everything on exit.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Read `key`, or `default` when it is absent or unreadable.
    ///
    /// A raw value that is not valid JSON is retried as a bare JSON string,
    /// so plain-text values written by older versions (`camera` rather than
    /// `"camera"`) still load.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.storage.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("Failed to read preference '{}': {}", key, e);
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(_) => match serde_json::from_value(serde_json::Value::String(raw)) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to parse preference '{}': {}", key, e);
                    default
                }
            },
        }
    }

    /// Write `value` under `key`. Failures are logged, never returned.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize preference '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.storage.write(key, &raw) {
            warn!("Failed to save preference '{}': {}", key, e);
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::model::ScanMode;

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("quota exceeded").into())
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("quota exceeded").into())
        }
    }

    #[test]
    fn test_default_when_absent() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.get(KEY_SCAN_MODE, ScanMode::Camera), ScanMode::Camera);
    }

    #[test]
    fn test_typed_roundtrip() {
        let store = PreferenceStore::in_memory();
        store.set(KEY_SCAN_MODE, &ScanMode::File);
        assert_eq!(store.get(KEY_SCAN_MODE, ScanMode::Camera), ScanMode::File);
    }

    #[test]
    fn test_bare_string_value() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(KEY_SCAN_MODE, "file").unwrap();
        let store = PreferenceStore::new(storage);
        assert_eq!(store.get(KEY_SCAN_MODE, ScanMode::Camera), ScanMode::File);
    }

    #[test]
    fn test_parse_failure_returns_default() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write("count", "not-a-number").unwrap();
        let store = PreferenceStore::new(storage);
        assert_eq!(store.get("count", 7u32), 7);
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let store = PreferenceStore::new(Arc::new(BrokenStorage));
        store.set(KEY_SCAN_MODE, &ScanMode::File);
        assert_eq!(store.get(KEY_SCAN_MODE, ScanMode::Camera), ScanMode::Camera);
    }
}
