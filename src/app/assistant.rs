//! The assistant view: displayed response, reveal, navigation and saving.

use tracing::{debug, warn};

use super::App;
use crate::markdown::LinkInfo;
use crate::models::SettingOption;
use crate::reveal::{ApplyOutcome, RevealTask};

impl App {
    /// Text shown before the first response arrives.
    pub fn placeholder_text(&self) -> String {
        format!(
            "Hey, Im listening to your {}?",
            self.preferences.profile().label()
        )
    }

    /// "{index+1}/{len}", or `None` with no responses.
    pub fn response_counter(&self) -> Option<String> {
        self.reconciler.log().counter()
    }

    /// Re-render the displayed response.
    ///
    /// Showing a different entry resets the scroll offset. A new revision of
    /// the same entry keeps it, and only the words beyond the previously
    /// revealed count are animated.
    pub fn refresh_response(&mut self) {
        let index = self.reconciler.log().current_index();
        if index != self.displayed_index {
            self.scroll.reset();
            self.displayed_index = index;
        }

        let (text, animate, previous) = match self.reconciler.log().current() {
            Some(text) => {
                let animation = self.reconciler.animation();
                (
                    text.to_string(),
                    animation.should_animate,
                    animation.revealed_word_count,
                )
            }
            None => (self.placeholder_text(), false, 0),
        };

        let outcome = self
            .renderer
            .render(&text, animate, previous, self.scheduler.as_mut());
        if self.displayed_index.is_some() {
            self.reconciler.animation_mut().revealed_word_count = outcome.revealed_count;
        }
        self.mark_dirty();
    }

    /// Apply a reveal task fired by the scheduler.
    pub fn apply_reveal(&mut self, task: RevealTask) {
        let now = self.scheduler.now_ms();
        match self.renderer.apply(task, now) {
            ApplyOutcome::Completed => {
                debug!("Reveal complete for generation {}", task.generation);
                self.reconciler.on_animation_complete();
            }
            ApplyOutcome::Stale => return,
            ApplyOutcome::WordShown(_) => {}
        }
        self.mark_dirty();
    }

    pub fn previous_response(&mut self) {
        if self.reconciler.select_previous() {
            self.refresh_response();
        }
    }

    pub fn next_response(&mut self) {
        if self.reconciler.select_next() {
            self.refresh_response();
        }
    }

    pub fn scroll_response_up(&mut self) {
        if self.scroll.scroll_up() {
            self.mark_dirty();
        }
    }

    pub fn scroll_response_down(&mut self) {
        if self.scroll.scroll_down() {
            self.mark_dirty();
        }
    }

    /// Links in the displayed response.
    pub fn response_links(&self) -> &[LinkInfo] {
        if self.displayed_index.is_none() {
            return &[];
        }
        self.renderer.links()
    }

    /// Open the n-th link of the displayed response.
    pub fn open_response_link(&mut self, index: usize) {
        let Some(url) = self.response_links().get(index).map(|l| l.url.clone()) else {
            return;
        };
        self.open_external(&url);
    }

    /// Whether the displayed response is already saved.
    pub fn is_current_saved(&self) -> bool {
        match self.reconciler.log().current() {
            Some(text) => self
                .preferences
                .saved_responses()
                .iter()
                .any(|s| s.same_text(text)),
            None => false,
        }
    }

    /// Save the displayed response. Already saved text is left alone.
    pub fn save_current_response(&mut self) {
        let Some(text) = self.reconciler.log().current().map(str::to_string) else {
            return;
        };
        let profile = self.preferences.profile();
        match self.preferences.save_response(&text, profile) {
            Ok(true) => self.show_notice("Response saved"),
            Ok(false) => self.show_notice("Response already saved"),
            Err(e) => {
                warn!("Failed to save response: {}", e);
                let error = crate::error::StorageError::from(e);
                self.show_notice(error.user_message());
            }
        }
    }
}
