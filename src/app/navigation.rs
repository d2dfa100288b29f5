//! View routing for the App.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{App, AppMessage, View};
use crate::bridge::HostRequest;

impl App {
    /// Switch views and tell the host about it.
    pub fn set_view(&mut self, view: View) {
        if self.view == view {
            return;
        }
        debug!("View {} -> {}", self.view.as_str(), view.as_str());
        self.view = view;
        self.confirm_clear = false;
        if view == View::History {
            self.load_history();
        }
        self.request(HostRequest::NotifyViewChanged {
            view: view.as_str().to_string(),
        });
        self.mark_dirty();
    }

    /// Header navigation is offered on main and the secondary views only.
    fn header_available(&self) -> bool {
        self.view == View::Main || self.view.is_secondary()
    }

    pub fn open_customize(&mut self) {
        if self.header_available() {
            self.set_view(View::Customize);
        }
    }

    pub fn open_help(&mut self) {
        if self.header_available() {
            self.set_view(View::Help);
        }
    }

    pub fn open_history(&mut self) {
        if self.header_available() {
            self.set_view(View::History);
        }
    }

    /// Only reachable while advanced mode is on.
    pub fn open_advanced(&mut self) {
        if self.header_available() && self.preferences.advanced_mode() {
            self.set_view(View::Advanced);
        }
    }

    /// Back button: secondary views return to main.
    pub fn back(&mut self) {
        if self.view.is_secondary() {
            self.set_view(View::Main);
        }
    }

    /// Close button.
    ///
    /// Secondary views return to main, the assistant ends the session and
    /// returns to main, and main or onboarding asks the host to quit.
    pub fn close(&mut self) {
        match self.view {
            view if view.is_secondary() => self.set_view(View::Main),
            View::Assistant => {
                self.end_session();
                self.set_view(View::Main);
            }
            _ => self.request_quit(),
        }
    }

    /// Stop capture and close the session, in that order.
    fn end_session(&mut self) {
        info!("Ending session");
        let bridge = Arc::clone(&self.bridge);
        self.dispatch("close_session", async move {
            if let Err(e) = bridge.stop_capture().await {
                warn!("stop_capture failed: {}", e);
            }
            bridge.close_session().await
        });
        self.session_started_at = None;
    }

    /// Ask the host to quit; the TUI exits once the call has settled.
    pub fn request_quit(&mut self) {
        info!("Requesting application quit");
        let bridge = Arc::clone(&self.bridge);
        let tx = self.message_tx.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = bridge.quit_application().await {
                warn!("quit_application failed: {}", e);
            }
            let _ = tx.send(AppMessage::QuitAcknowledged);
        });
        self.track(handle);
    }

    pub fn toggle_visibility(&mut self) {
        self.request(HostRequest::ToggleWindowVisibility);
    }

    /// Advance the wizard, finishing it on the last step.
    pub fn onboarding_next(&mut self) {
        match self.onboarding_step.next() {
            Some(step) => {
                self.onboarding_step = step;
                self.mark_dirty();
            }
            None => self.complete_onboarding(),
        }
    }

    pub fn onboarding_prev(&mut self) {
        if let Some(step) = self.onboarding_step.prev() {
            self.onboarding_step = step;
            self.mark_dirty();
        }
    }

    /// Finish (or skip) onboarding and go to main.
    pub fn complete_onboarding(&mut self) {
        let result = self.preferences.set_onboarding_completed();
        self.persist(result);
        self.set_view(View::Main);
    }
}
