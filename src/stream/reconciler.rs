//! Merges streamed response fragments into the response log.

use tracing::debug;

use super::log::ResponseLog;
use super::policy::{FillerPolicy, StatusPolicy};
use crate::reveal::AnimationState;

/// Turn-tracking flags, mutated only by the reconciler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamState {
    /// Set when the user sends a message, cleared by the next fragment.
    pub awaiting_new_entry: bool,
    /// Set by a terminal status or a finished reveal.
    pub current_entry_complete: bool,
}

/// What a fragment did to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// A new entry was added and selected.
    Appended { index: usize },
    /// The in-progress entry's text was replaced.
    Replaced { index: usize },
}

impl FragmentOutcome {
    pub fn index(&self) -> usize {
        match self {
            FragmentOutcome::Appended { index } | FragmentOutcome::Replaced { index } => *index,
        }
    }
}

/// Decides for each fragment whether it extends the in-progress response or
/// starts a new one.
///
/// Fragments carry the full text of the turn so far, so an extension
/// replaces the entry rather than concatenating.
#[derive(Debug, Clone, Default)]
pub struct ResponseReconciler {
    log: ResponseLog,
    state: StreamState,
    animation: AnimationState,
    filler: FillerPolicy,
    status: StatusPolicy,
}

impl ResponseReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policies(filler: FillerPolicy, status: StatusPolicy) -> Self {
        Self {
            filler,
            status,
            ..Self::default()
        }
    }

    pub fn log(&self) -> &ResponseLog {
        &self.log
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationState {
        &mut self.animation
    }

    /// Apply one response fragment from the host.
    pub fn on_fragment(&mut self, fragment: &str) -> FragmentOutcome {
        let outcome = if self.state.awaiting_new_entry || self.log.is_empty() {
            self.state.awaiting_new_entry = false;
            self.append(fragment)
        } else if !self.state.current_entry_complete && !self.filler.is_filler(fragment) {
            match self.log.replace_last(fragment) {
                Some(index) => FragmentOutcome::Replaced { index },
                None => self.append(fragment),
            }
        } else {
            self.append(fragment)
        };

        debug!(
            "Fragment ({} chars) -> {:?}",
            fragment.chars().count(),
            outcome
        );
        self.animation.should_animate = true;
        outcome
    }

    fn append(&mut self, fragment: &str) -> FragmentOutcome {
        let index = self.log.push(fragment);
        self.state.current_entry_complete = false;
        self.animation.revealed_word_count = 0;
        FragmentOutcome::Appended { index }
    }

    /// Apply a status line. Returns true if it closed the current turn.
    pub fn on_status(&mut self, text: &str) -> bool {
        if self.status.is_terminal(text) {
            self.state.current_entry_complete = true;
            true
        } else {
            false
        }
    }

    /// The user sent a message; the next fragment starts a new entry.
    pub fn on_send_message(&mut self) {
        self.state.awaiting_new_entry = true;
    }

    /// The reveal of the current entry finished.
    pub fn on_animation_complete(&mut self) {
        self.animation.should_animate = false;
        self.state.current_entry_complete = true;
    }

    pub fn select_previous(&mut self) -> bool {
        let moved = self.log.select_previous();
        if moved {
            self.on_selection_changed();
        }
        moved
    }

    pub fn select_next(&mut self) -> bool {
        let moved = self.log.select_next();
        if moved {
            self.on_selection_changed();
        }
        moved
    }

    fn on_selection_changed(&mut self) {
        self.animation.should_animate = false;
        self.animation.revealed_word_count = 0;
    }

    /// Forget everything; used when a new session starts.
    pub fn reset(&mut self) {
        self.log.clear();
        self.state = StreamState::default();
        self.animation = AnimationState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streaming(entries: &[&str]) -> ResponseReconciler {
        let mut r = ResponseReconciler::new();
        for (i, e) in entries.iter().enumerate() {
            if i > 0 {
                r.on_status("Ready");
            }
            r.on_fragment(e);
        }
        r
    }

    #[test]
    fn test_first_fragment_appends() {
        let mut r = ResponseReconciler::new();
        assert_eq!(r.on_fragment("Hi"), FragmentOutcome::Appended { index: 0 });
        assert_eq!(r.log().current_index(), Some(0));
        assert!(r.animation().should_animate);
    }

    #[test]
    fn test_awaiting_fragment_becomes_first_entry() {
        let mut r = ResponseReconciler::new();
        r.on_send_message();
        r.on_fragment("ok");
        assert_eq!(r.log().entries(), &["ok".to_string()]);
        assert_eq!(r.log().current_index(), Some(0));
        assert!(!r.state().awaiting_new_entry);
    }

    #[test]
    fn test_substantive_fragment_replaces_tail() {
        let mut r = streaming(&["Hello wor"]);
        assert_eq!(
            r.on_fragment("Hello world"),
            FragmentOutcome::Replaced { index: 0 }
        );
        assert_eq!(r.log().entries(), &["Hello world".to_string()]);
    }

    #[test]
    fn test_filler_fragment_appends() {
        let mut r = streaming(&["Hello wor"]);
        assert_eq!(r.on_fragment("ok"), FragmentOutcome::Appended { index: 1 });
        assert_eq!(
            r.log().entries(),
            &["Hello wor".to_string(), "ok".to_string()]
        );
        assert_eq!(r.log().current_index(), Some(1));
    }

    #[test]
    fn test_terminal_status_forces_new_entry() {
        let mut r = streaming(&["First answer in progress"]);
        assert!(r.on_status("Listening..."));
        r.on_fragment("Second answer");
        assert_eq!(r.log().len(), 2);
        assert!(!r.state().current_entry_complete);
    }

    #[test]
    fn test_non_terminal_status_keeps_turn_open() {
        let mut r = streaming(&["Partial"]);
        assert!(!r.on_status("Connecting..."));
        r.on_fragment("Partial answer");
        assert_eq!(r.log().len(), 1);
    }

    #[test]
    fn test_send_overrides_incomplete_turn() {
        let mut r = streaming(&["Still streaming"]);
        r.on_send_message();
        r.on_fragment("Reply to the new question");
        assert_eq!(r.log().len(), 2);
    }

    #[test]
    fn test_empty_fragment_is_accepted() {
        let mut r = ResponseReconciler::new();
        r.on_fragment("");
        r.on_fragment("");
        assert_eq!(r.log().entries(), &["".to_string()]);
    }

    #[test]
    fn test_replace_keeps_revealed_count_append_resets_it() {
        let mut r = streaming(&["one two"]);
        r.animation_mut().revealed_word_count = 2;
        r.on_fragment("one two three");
        assert_eq!(r.animation().revealed_word_count, 2);

        r.on_status("Ready");
        r.on_fragment("fresh");
        assert_eq!(r.animation().revealed_word_count, 0);
    }

    #[test]
    fn test_navigation_disables_animation() {
        let mut r = streaming(&["a", "b", "c"]);
        r.animation_mut().revealed_word_count = 1;
        assert!(r.select_previous());
        assert!(!r.animation().should_animate);
        assert_eq!(r.animation().revealed_word_count, 0);
        assert_eq!(r.log().current_index(), Some(1));
    }

    #[test]
    fn test_navigation_at_bounds_is_noop() {
        let mut r = streaming(&["a"]);
        assert!(!r.select_next());
        assert!(!r.select_previous());
        assert!(r.animation().should_animate);
    }

    #[test]
    fn test_animation_complete_closes_turn() {
        let mut r = streaming(&["Answer"]);
        r.on_animation_complete();
        assert!(!r.animation().should_animate);
        r.on_fragment("Answer continued");
        assert_eq!(r.log().len(), 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut r = streaming(&["a", "b"]);
        r.on_send_message();
        r.reset();
        assert!(r.log().is_empty());
        assert_eq!(r.state(), StreamState::default());
    }
}
