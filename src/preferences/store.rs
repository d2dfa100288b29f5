//! Key-value persistence behind the preference wrapper.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{CueError, StorageError};

/// File name of the preference store inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Error type for preference writes.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Could not create the data directory or write the file
    #[error("Failed to write preferences to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not encode the preference map
    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<PreferenceError> for CueError {
    fn from(err: PreferenceError) -> Self {
        CueError::Storage(err.into())
    }
}

impl From<PreferenceError> for StorageError {
    fn from(err: PreferenceError) -> Self {
        match err {
            PreferenceError::Write { path, source } => StorageError::WriteFailed {
                path,
                message: source.to_string(),
            },
            PreferenceError::Encode(e) => StorageError::SerializeFailed {
                message: e.to_string(),
            },
        }
    }
}

/// String-keyed persistent storage.
///
/// Writes are last-write-wins. Implementations must never fail a read:
/// anything unreadable is reported as absent.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;

    fn remove(&mut self, key: &str) -> Result<(), PreferenceError>;

    /// All keys currently stored, in sorted order.
    fn keys(&self) -> Vec<String>;
}

/// JSON object on disk, written through on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `<data_dir>/preferences.json`.
    ///
    /// A missing or corrupted file yields an empty store.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(PREFERENCES_FILE);
        let values = Self::load(&path).unwrap_or_else(|e| {
            warn!("{} [{}], starting with defaults", e, e.error_code());
            BTreeMap::new()
        });
        debug!("Loaded {} preference keys from {}", values.len(), path.display());
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|e| StorageError::Corrupted {
            what: "preferences".to_string(),
            message: e.to_string(),
        })
    }

    fn flush(&self) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = File::create(&self.path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.values)?;
        writer.flush().map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), PreferenceError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}
