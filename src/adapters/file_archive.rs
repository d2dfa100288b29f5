//! Archive store reading the host's session files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::ConversationSession;
use crate::traits::{ArchiveError, ArchiveStore};

/// Subdirectory of the data directory holding one JSON file per session.
pub const HISTORY_DIR: &str = "history";

/// Reads `<data_dir>/history/*.json`.
#[derive(Debug, Clone)]
pub struct FileArchiveStore {
    dir: PathBuf,
}

impl FileArchiveStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join(HISTORY_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn json_files(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ArchiveError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        Ok(entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect())
    }
}

impl ArchiveStore for FileArchiveStore {
    fn sessions(&self) -> Result<Vec<ConversationSession>, ArchiveError> {
        let mut sessions = Vec::new();
        for path in self.json_files()? {
            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|raw| {
                    serde_json::from_str::<ConversationSession>(&raw).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(session) => sessions.push(session),
                Err(e) => warn!("Skipping unreadable session {}: {}", path.display(), e),
            }
        }

        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        debug!("Loaded {} archived sessions", sessions.len());
        Ok(sessions)
    }

    fn clear(&self) -> Result<(), ArchiveError> {
        for path in self.json_files()? {
            fs::remove_file(&path).map_err(|source| ArchiveError::Io {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_session(dir: &Path, id: &str, millis: i64) {
        let history = dir.join(HISTORY_DIR);
        fs::create_dir_all(&history).unwrap();
        let json = format!(
            r#"{{"sessionId":"{id}","timestamp":{millis},"profile":"interview","conversationHistory":[]}}"#
        );
        fs::write(history.join(format!("{id}.json")), json).unwrap();
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileArchiveStore::new(dir.path());
        assert!(store.sessions().unwrap().is_empty());
        store.clear().unwrap();
    }

    #[test]
    fn test_sessions_newest_first() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), "old", 1_000);
        write_session(dir.path(), "new", 3_000);
        write_session(dir.path(), "mid", 2_000);

        let store = FileArchiveStore::new(dir.path());
        let ids: Vec<String> = store
            .sessions()
            .unwrap()
            .into_iter()
            .map(|s| s.session_id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_unreadable_files_skipped() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), "good", 1_000);
        fs::write(dir.path().join(HISTORY_DIR).join("bad.json"), "{").unwrap();
        fs::write(dir.path().join(HISTORY_DIR).join("notes.txt"), "ignored").unwrap();

        let store = FileArchiveStore::new(dir.path());
        assert_eq!(store.sessions().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_removes_sessions() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), "a", 1_000);
        let store = FileArchiveStore::new(dir.path());
        store.clear().unwrap();
        assert!(store.sessions().unwrap().is_empty());
    }
}
