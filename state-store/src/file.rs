//! JSON file backed store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::error::{Result, StoreError};
use crate::store::KeyValueStore;

/// Store whose contents live in a single JSON object file
///
/// Every write rewrites the whole file through a temp file and a rename, so a
/// crash mid-write leaves either the old or the new contents. A missing file
/// reads as empty.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store at `path`; nothing is touched until the first access
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `<cache dir>/sonos-remote/session.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("sonos-remote").join("session.json"))
    }

    /// Store at [`JsonFileStore::default_path`]
    pub fn open_default() -> Result<Self> {
        Self::default_path().map(Self::open).ok_or(StoreError::NoCacheDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                message: format!("expected a JSON object, found {}", kind(&other)),
            }),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    /// Load for a read-modify-write; a corrupt file is replaced rather than kept
    fn load_for_update(&self) -> Result<Map<String, Value>> {
        match self.load() {
            Err(StoreError::Corrupt { path, message }) => {
                tracing::warn!(path = %path.display(), %message, "Replacing corrupt store file");
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(map)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents).map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), keys = map.len(), "Saved store");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.load()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut map = self.load_for_update()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&map)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut map = self.load_for_update()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
