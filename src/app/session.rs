//! Session control: API key entry, session start and text messages.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{App, AppMessage, TimedNotice, View, API_KEY_ERROR_TTL};
use crate::bridge::{HostRequest, SendResult};
use crate::models::{LayoutMode, SettingOption};

/// Where to get an API key.
pub const API_KEY_HELP_URL: &str = "https://aistudio.google.com/apikey";

/// Links listed on the help view, opened with the matching digit key.
pub const HELP_LINKS: [(&str, &str); 3] = [
    ("Get an API key", API_KEY_HELP_URL),
    ("Gemini API documentation", "https://ai.google.dev/gemini-api/docs"),
    ("Rate limits", "https://ai.google.dev/gemini-api/docs/rate-limits"),
];

/// Shown when starting without an API key.
pub const API_KEY_REQUIRED: &str = "Please enter your API key";

impl App {
    /// Append to the API key field and persist it.
    pub fn api_key_insert(&mut self, c: char) {
        self.api_key_input.push(c);
        self.api_key_edited();
    }

    pub fn api_key_backspace(&mut self) {
        if self.api_key_input.pop().is_some() {
            self.api_key_edited();
        }
    }

    fn api_key_edited(&mut self) {
        let result = self.preferences.set_api_key(&self.api_key_input);
        self.persist(result);
        self.api_key_error = None;
        self.mark_dirty();
    }

    pub fn open_api_key_help(&mut self) {
        self.open_external(API_KEY_HELP_URL);
    }

    pub fn open_external(&mut self, url: &str) {
        self.request(HostRequest::OpenExternal {
            url: url.to_string(),
        });
    }

    pub fn open_help_link(&mut self, index: usize) {
        if let Some((_, url)) = HELP_LINKS.get(index) {
            self.open_external(url);
        }
    }

    /// Flip between normal and compact layout.
    pub fn toggle_layout_mode(&mut self) {
        let next = self.preferences.layout_mode().next();
        self.set_layout_mode(next);
    }

    pub(crate) fn set_layout_mode(&mut self, mode: LayoutMode) {
        let result = self.preferences.set_layout_mode(mode);
        self.persist(result);
        self.request(HostRequest::NotifySizesChanged);
        self.mark_dirty();
    }

    /// Start a session.
    ///
    /// Returns false without changing state when no API key is stored, in
    /// which case the main view shows a validation error, or while the host
    /// is still initializing a previous session.
    pub fn start_session(&mut self) -> bool {
        if self.session_initializing {
            debug!("Start ignored, session still initializing");
            return false;
        }
        let api_key = self.preferences.api_key().trim().to_string();
        if api_key.is_empty() {
            self.api_key_error = Some(TimedNotice::new(
                API_KEY_REQUIRED,
                Instant::now(),
                API_KEY_ERROR_TTL,
            ));
            self.mark_dirty();
            return false;
        }

        let profile = self.preferences.profile();
        let language = self.preferences.language();
        let interval = self.preferences.screenshot_interval();
        let quality = self.preferences.image_quality();
        info!(
            "Starting session: profile={} language={} interval={} quality={}",
            profile.as_str(),
            language.as_str(),
            interval.as_str(),
            quality.as_str()
        );

        let bridge = Arc::clone(&self.bridge);
        let tx = self.message_tx.clone();
        let handle = tokio::spawn(async move {
            let result = match bridge.initialize_session(&api_key, profile, language).await {
                Ok(()) => bridge
                    .start_capture(interval, quality)
                    .await
                    .map_err(|e| ("start_capture", e)),
                Err(e) => Err(("initialize_session", e)),
            };
            let success = result.is_ok();
            if let Err((method, error)) = result {
                warn!("Session start failed at {}: {}", method, error);
                let _ = tx.send(AppMessage::CallFailed { method, error });
            }
            let _ = tx.send(AppMessage::SessionStarted { success });
        });
        self.track(handle);

        self.reconciler.reset();
        self.scroll.reset();
        self.message_input.clear();
        self.session_started_at = Some(Instant::now());
        self.set_view(View::Assistant);
        self.refresh_response();
        true
    }

    pub fn message_insert(&mut self, c: char) {
        self.message_input.push(c);
        self.mark_dirty();
    }

    pub fn message_backspace(&mut self) {
        if self.message_input.pop().is_some() {
            self.mark_dirty();
        }
    }

    /// Send the text field to the host. Blank input is ignored.
    pub fn send_text(&mut self) {
        let message = self.message_input.trim().to_string();
        if message.is_empty() {
            return;
        }
        self.message_input.clear();
        self.mark_dirty();

        let bridge = Arc::clone(&self.bridge);
        let tx = self.message_tx.clone();
        let handle = tokio::spawn(async move {
            let result = SendResult::from(bridge.send_text_message(&message).await);
            let _ = tx.send(AppMessage::SendFinished(result));
        });
        self.track(handle);
    }

    pub(crate) fn on_send_finished(&mut self, result: SendResult) {
        if result.success {
            self.status_text = "Message sent...".to_string();
            self.reconciler.on_send_message();
        } else {
            let error = result.error.unwrap_or_default();
            warn!("Failed to send message: {}", error);
            self.status_text = format!("Error sending message: {}", error);
        }
        self.mark_dirty();
    }
}
