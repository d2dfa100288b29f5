//! Persistent storage error types.

use std::fmt;
use std::path::PathBuf;

/// Errors from the preference store and the conversation archive.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Reading a backing file failed.
    ReadFailed { path: PathBuf, message: String },

    /// Writing a backing file failed.
    WriteFailed { path: PathBuf, message: String },

    /// Stored content could not be decoded.
    Corrupted { what: String, message: String },

    /// A value could not be encoded for storage.
    SerializeFailed { message: String },
}

impl StorageError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StorageError::ReadFailed { path, .. } => {
                format!("Could not read '{}'", path.display())
            }
            StorageError::WriteFailed { path, .. } => {
                format!("Could not save settings to '{}'", path.display())
            }
            StorageError::Corrupted { what, .. } => {
                format!("Stored {} could not be decoded and was ignored", what)
            }
            StorageError::SerializeFailed { .. } => "Could not encode settings".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ReadFailed { .. } => "E_STORE_READ",
            StorageError::WriteFailed { .. } => "E_STORE_WRITE",
            StorageError::Corrupted { .. } => "E_STORE_CORRUPT",
            StorageError::SerializeFailed { .. } => "E_STORE_ENCODE",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
            StorageError::WriteFailed { path, message } => {
                write!(f, "Failed to write {}: {}", path.display(), message)
            }
            StorageError::Corrupted { what, message } => {
                write!(f, "Corrupted {}: {}", what, message)
            }
            StorageError::SerializeFailed { message } => {
                write!(f, "Serialization failed: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}
