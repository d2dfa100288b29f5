//! In-memory archive for testing.

use std::sync::{Arc, Mutex, PoisonError};

use crate::models::ConversationSession;
use crate::traits::{ArchiveError, ArchiveStore};

#[derive(Debug, Clone, Default)]
pub struct InMemoryArchive {
    sessions: Arc<Mutex<Vec<ConversationSession>>>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<ConversationSession>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArchiveStore for InMemoryArchive {
    fn sessions(&self) -> Result<Vec<ConversationSession>, ArchiveError> {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sessions)
    }

    fn clear(&self) -> Result<(), ArchiveError> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}
