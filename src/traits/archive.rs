//! Read access to archived sessions.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::{CueError, StorageError};
use crate::models::ConversationSession;

/// Error type for archive access.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive directory could not be listed or cleared
    #[error("Archive I/O failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ArchiveError> for CueError {
    fn from(err: ArchiveError) -> Self {
        CueError::Storage(err.into())
    }
}

impl From<ArchiveError> for StorageError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::Io { path, source } => StorageError::ReadFailed {
                path,
                message: source.to_string(),
            },
        }
    }
}

/// Archived conversations written by the host.
pub trait ArchiveStore: Send + Sync {
    /// All sessions, newest first.
    fn sessions(&self) -> Result<Vec<ConversationSession>, ArchiveError>;

    /// Delete every archived session.
    fn clear(&self) -> Result<(), ArchiveError>;
}
