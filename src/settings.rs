//! Host settings store capability.
//!
//! The host owns a free-form JSON object of settings. A panel reads the
//! `currentFile` entry once at mount and writes it back after every change,
//! leaving every other key untouched.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::file::FileRecord;

/// Key under which the open file is stored.
pub const CURRENT_FILE_KEY: &str = "currentFile";

/// Free-form settings mapping handed to a module by its host.
pub type Settings = Map<String, Value>;

/// Read/replace access to the host's settings for one module.
pub trait SettingsStore {
    /// Snapshot of the current settings.
    fn get(&self) -> Settings;

    /// Replace the settings wholesale.
    fn set(&self, settings: Settings);
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
}

/// The file stored under `currentFile`, if present and well-formed.
pub fn current_file(settings: &Settings) -> Option<FileRecord> {
    let value = settings.get(CURRENT_FILE_KEY)?;
    match serde_json::from_value(value.clone()) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::debug!(%err, "ignoring malformed {CURRENT_FILE_KEY} entry");
            None
        }
    }
}

/// `settings` with `currentFile` replaced by `record`.
pub fn with_current_file(settings: &Settings, record: &FileRecord) -> Settings {
    let mut merged = settings.clone();
    let value = serde_json::to_value(record).unwrap_or(Value::Null);
    merged.insert(CURRENT_FILE_KEY.to_string(), value);
    merged
}

/// Settings kept in memory, recording every write.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    current: RefCell<Settings>,
    writes: RefCell<Vec<Settings>>,
}

impl MemorySettingsStore {
    pub fn new(initial: Settings) -> Self {
        Self {
            current: RefCell::new(initial),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Every mapping passed to [`SettingsStore::set`], oldest first.
    pub fn writes(&self) -> Vec<Settings> {
        self.writes.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    pub fn last_write(&self) -> Option<Settings> {
        self.writes.borrow().last().cloned()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self) -> Settings {
        self.current.borrow().clone()
    }

    fn set(&self, settings: Settings) {
        self.writes.borrow_mut().push(settings.clone());
        *self.current.borrow_mut() = settings;
    }
}

/// Settings backed by a pretty-printed JSON file, rewritten on every set.
#[derive(Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    current: RefCell<Settings>,
}

impl JsonFileSettingsStore {
    /// Load settings from `path`. A missing file starts out empty.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let current = load_settings(&path)?;
        Ok(Self {
            path,
            current: RefCell::new(current),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, settings: &Settings) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, format!("{text}\n")).map_err(io_err)
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn get(&self) -> Settings {
        self.current.borrow().clone()
    }

    fn set(&self, settings: Settings) {
        if let Err(err) = self.write(&settings) {
            tracing::warn!(%err, "settings write failed");
        }
        *self.current.borrow_mut() = settings;
    }
}

fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        return Ok(Settings::new());
    }
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(Settings::new());
    }
    let value: Value = serde_json::from_str(&text).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SettingsError::NotAnObject(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn settings(value: Value) -> Settings {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_current_file_absent() {
        assert_eq!(current_file(&Settings::new()), None);
    }

    #[test]
    fn test_current_file_malformed_is_none() {
        let s = settings(json!({"currentFile": {"name": 3}}));
        assert_eq!(current_file(&s), None);
        let s = settings(json!({"currentFile": "notes.txt"}));
        assert_eq!(current_file(&s), None);
    }

    #[test]
    fn test_current_file_well_formed() {
        let s = settings(json!({
            "currentFile": {"id": "f1", "name": "a.py", "content": "x = 1", "language": "python"}
        }));
        let record = current_file(&s).unwrap();
        assert_eq!(record.id.as_deref(), Some("f1"));
        assert_eq!(record.name, "a.py");
        assert_eq!(record.content, "x = 1");
        assert_eq!(record.language, "python");
    }

    #[test]
    fn test_with_current_file_preserves_other_keys() {
        let s = settings(json!({
            "fontScale": 1.5,
            "recent": ["a", "b"],
            "currentFile": {"name": "old", "content": "", "language": "plaintext"}
        }));
        let record = FileRecord {
            content: "new".to_string(),
            ..FileRecord::default()
        };
        let merged = with_current_file(&s, &record);
        assert_eq!(merged["fontScale"], json!(1.5));
        assert_eq!(merged["recent"], json!(["a", "b"]));
        assert_eq!(merged["currentFile"]["content"], json!("new"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_memory_store_records_writes() {
        let store = MemorySettingsStore::new(settings(json!({"a": 1})));
        assert_eq!(store.write_count(), 0);
        store.set(settings(json!({"a": 2})));
        assert_eq!(store.get()["a"], json!(2));
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.last_write().unwrap()["a"], json!(2));
    }

    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileSettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_json_file_store_persists_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let store = JsonFileSettingsStore::open(&path).unwrap();
        store.set(settings(json!({"theme": "dark", "currentFile": {
            "name": "n.md", "content": "# hi", "language": "markdown"
        }})));

        let reopened = JsonFileSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get()["theme"], json!("dark"));
        assert_eq!(current_file(&reopened.get()).unwrap().name, "n.md");
    }

    #[test]
    fn test_json_file_store_rejects_non_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2]").unwrap();
        let err = JsonFileSettingsStore::open(&path).unwrap_err();
        assert!(matches!(err, SettingsError::NotAnObject(_)));
    }

    #[test]
    fn test_json_file_store_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ nope").unwrap();
        let err = JsonFileSettingsStore::open(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Json { .. }));
    }
}
