//! Archived sessions shown by the history view.

use tracing::{debug, warn};

use super::{step_index, App};
use crate::error::{ErrorContext, ResultExt};
use crate::models::ConversationSession;

/// History list state.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    /// Newest first
    pub sessions: Vec<ConversationSession>,
    pub selected: usize,
    /// Showing the selected session's turns instead of the list
    pub detail_open: bool,
    pub detail_scroll: u16,
    /// Load failure shown in place of the list
    pub error: Option<String>,
}

impl HistoryState {
    pub fn selected_session(&self) -> Option<&ConversationSession> {
        self.sessions.get(self.selected)
    }
}

impl App {
    /// Reload sessions from the archive.
    pub fn load_history(&mut self) {
        let sessions = self
            .archive
            .sessions()
            .with_context(|| ErrorContext::new("load history").with_component("archive"));
        self.history = match sessions {
            Ok(sessions) => {
                debug!("Loaded {} archived sessions", sessions.len());
                HistoryState {
                    sessions,
                    ..Default::default()
                }
            }
            Err(e) => {
                warn!("{} [{}]", e, e.error_code());
                HistoryState {
                    error: Some(e.user_message()),
                    ..Default::default()
                }
            }
        };
        self.mark_dirty();
    }

    pub fn history_move(&mut self, forward: bool) {
        if self.history.detail_open {
            self.history.detail_scroll = if forward {
                self.history.detail_scroll.saturating_add(1)
            } else {
                self.history.detail_scroll.saturating_sub(1)
            };
        } else {
            self.history.selected =
                step_index(self.history.selected, self.history.sessions.len(), forward);
        }
        self.mark_dirty();
    }

    pub fn history_open_selected(&mut self) {
        if self.history.selected_session().is_some() {
            self.history.detail_open = true;
            self.history.detail_scroll = 0;
            self.mark_dirty();
        }
    }

    /// Leave the detail pane. Returns false if it was not open.
    pub fn history_close_detail(&mut self) -> bool {
        if self.history.detail_open {
            self.history.detail_open = false;
            self.mark_dirty();
            true
        } else {
            false
        }
    }
}
