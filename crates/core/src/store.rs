//! Persistence - best score and settings behind an opaque key-value store
//!
//! The session only ever talks to [`Persistence`], which swallows storage
//! failures: a read that fails or finds garbage yields the default, a write
//! that fails is logged at `warn` and dropped. Nothing here can interrupt
//! play.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::StoreError;
use crate::settings::Settings;

/// Key holding the best score as a JSON number.
pub const BEST_SCORE_KEY: &str = "2048-best-score";

/// Key holding the [`Settings`] document.
pub const SETTINGS_KEY: &str = "2048-settings";

/// String-to-string storage.
pub trait KeyValueStore: fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Keys double as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Volatile store; used when no data directory is available and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
///
/// The directory is created on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, value).map_err(|source| StoreError::Write { path, source })
    }
}

/// Best-score and settings persistence over an optional store.
#[derive(Debug, Default)]
pub struct Persistence {
    store: Option<Box<dyn KeyValueStore>>,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Some(Box::new(store)),
        }
    }

    /// No backing store: reads return defaults, writes are dropped.
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    fn read(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to read {key}: {e}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(e) = store.set(key, value) {
            warn!("failed to write {key}: {e}");
        }
    }

    /// Stored best score, or 0.
    pub fn load_best_score(&self) -> u32 {
        let Some(raw) = self.read(BEST_SCORE_KEY) else {
            return 0;
        };
        match serde_json::from_str::<u32>(raw.trim()) {
            Ok(score) => score,
            Err(e) => {
                warn!("ignoring corrupt best score {raw:?}: {e}");
                0
            }
        }
    }

    pub fn save_best_score(&mut self, score: u32) {
        self.write(BEST_SCORE_KEY, &score.to_string());
    }

    /// Stored settings, normalized, or the defaults.
    pub fn load_settings(&self) -> Settings {
        let Some(raw) = self.read(SETTINGS_KEY) else {
            return Settings::default();
        };
        match serde_json::from_str::<Settings>(&raw) {
            Ok(settings) => settings.normalized(),
            Err(e) => {
                warn!("ignoring corrupt settings: {e}");
                Settings::default()
            }
        }
    }

    pub fn save_settings(&mut self, settings: &Settings) {
        match serde_json::to_string(settings) {
            Ok(json) => self.write(SETTINGS_KEY, &json),
            Err(e) => warn!("failed to encode settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose every operation fails.
    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn test_key_validation() {
        assert!(validate_key(BEST_SCORE_KEY).is_ok());
        assert!(validate_key(SETTINGS_KEY).is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a b").is_err());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(store.set("bad/key", "v").is_err());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap(), None);

        store.set(BEST_SCORE_KEY, "1234").unwrap();
        let path = dir.path().join("nested").join("2048-best-score.json");
        assert_eq!(fs::read_to_string(path).unwrap(), "1234");
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_disabled_persistence_returns_defaults() {
        let mut p = Persistence::disabled();
        assert!(!p.is_enabled());
        p.save_best_score(100);
        assert_eq!(p.load_best_score(), 0);
        assert_eq!(p.load_settings(), Settings::default());
    }

    #[test]
    fn test_broken_store_degrades_to_defaults() {
        let mut p = Persistence::new(BrokenStore);
        p.save_best_score(100);
        p.save_settings(&Settings::default());
        assert_eq!(p.load_best_score(), 0);
        assert_eq!(p.load_settings(), Settings::default());
    }

    #[test]
    fn test_best_score_roundtrip_and_garbage() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "not a number").unwrap();
        let mut p = Persistence::new(store);
        assert_eq!(p.load_best_score(), 0);

        p.save_best_score(512);
        assert_eq!(p.load_best_score(), 512);
    }

    #[test]
    fn test_settings_roundtrip_and_corrupt_json() {
        let mut p = Persistence::memory();
        let mut settings = Settings::default();
        settings.show_grid = false;
        settings.set_volume(0.25);
        p.save_settings(&settings);
        assert_eq!(p.load_settings(), settings);

        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "{ broken").unwrap();
        assert_eq!(Persistence::new(store).load_settings(), Settings::default());
    }
}
