//! File-backed storage: one JSON object holding every key.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::port::StoragePort;

/// File name of the session document inside the data directory.
const SESSION_FILE_NAME: &str = "session.json";

/// The platform data location for the session document.
pub fn default_session_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "verimail")
        .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
}

/// Storage persisted to a JSON file.
///
/// The whole document is rewritten on every change using a temp file and a
/// rename, so a crash leaves either the old or the new document.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object is
    /// logged and treated as empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => decode_document(&path, &bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoreError::Io {
                    operation: "read",
                    path,
                    source: e,
                });
            }
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "Opened session store");
        Ok(Self { path, values })
    }

    /// Opens the store on the blocking pool.
    pub async fn open_async(path: PathBuf) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::open(path))
            .await
            .map_err(|e| StoreError::Task {
                source: Box::new(e),
            })?
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&mut self, next: BTreeMap<String, Value>) -> Result<()> {
        write_document(&self.path, &next)?;
        self.values = next;
        Ok(())
    }
}

impl StoragePort for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value);
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut next = self.values.clone();
        next.remove(key);
        self.commit(next)
    }

    /// One document rewrite for all `keys`.
    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        if !keys.iter().any(|key| self.values.contains_key(*key)) {
            return Ok(());
        }
        let mut next = self.values.clone();
        for key in keys {
            next.remove(*key);
        }
        self.commit(next)
    }
}

fn decode_document(path: &Path, bytes: &[u8]) -> BTreeMap<String, Value> {
    match serde_json::from_slice::<BTreeMap<String, Value>>(bytes) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is corrupt; starting empty"
            );
            BTreeMap::new()
        }
    }
}

fn write_document(path: &Path, values: &BTreeMap<String, Value>) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(values).map_err(|e| StoreError::Serialization {
        key: "*".to_string(),
        source: e,
    })?;

    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), keys = values.len(), "Saved session store");
    Ok(())
}
