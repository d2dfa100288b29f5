//! Application state and logic for the TUI.
//!
//! This module contains the [`App`] controller and related types:
//! - [`View`] - which view is displayed
//! - [`AppMessage`] - messages for async communication
//! - [`HistoryState`] - archived sessions shown by the history view
//!
//! `App` owns every piece of UI state. Background bridge calls report back
//! through [`AppMessage`]s, so state is only ever mutated on the UI loop.

mod assistant;
mod handlers;
mod history;
mod messages;
mod navigation;
mod session;
mod settings;
mod types;

pub use history::HistoryState;
pub use messages::AppMessage;
pub use session::{API_KEY_HELP_URL, API_KEY_REQUIRED, HELP_LINKS};
pub use settings::{MAX_TOKENS_STEP, THROTTLE_PERCENT_STEP};
pub use types::{step_index, AdvancedField, CustomizeField, OnboardingStep, TimedNotice, View};

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::bridge::HostRequest;
use crate::domain::ScrollState;
use crate::error::{BridgeError, ErrorContext, ResultExt};
use crate::preferences::{PreferenceError, Preferences};
use crate::reveal::{IncrementalRenderer, RevealConfig};
use crate::stream::ResponseReconciler;
use crate::traits::{ArchiveStore, BridgeState, HostBridge, RevealScheduler};

/// How long the API key validation error stays visible.
pub const API_KEY_ERROR_TTL: Duration = Duration::from_secs(1);

/// How long footer notices stay visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// External collaborators the controller talks to.
pub struct AppServices {
    pub bridge: Arc<dyn HostBridge>,
    pub preferences: Preferences,
    pub archive: Arc<dyn ArchiveStore>,
    pub scheduler: Box<dyn RevealScheduler>,
}

/// Main application state
pub struct App {
    /// Active view
    pub view: View,
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Dirty flag: set on state mutations, cleared after each draw
    pub needs_redraw: bool,
    /// Latest status line (from the host or from local actions)
    pub status_text: String,
    /// When the running session started
    pub session_started_at: Option<Instant>,
    pub click_through: bool,
    /// The host is still setting up a session; start requests are ignored
    pub session_initializing: bool,
    pub bridge_state: BridgeState,
    pub onboarding_step: OnboardingStep,
    /// API key field on the main view, persisted on every edit
    pub api_key_input: String,
    pub api_key_error: Option<TimedNotice>,
    /// Text field on the assistant view
    pub message_input: String,
    /// Short-lived footer message
    pub notice: Option<TimedNotice>,
    pub reconciler: ResponseReconciler,
    pub renderer: IncrementalRenderer,
    pub scroll: ScrollState,
    /// Entry index the renderer currently shows
    displayed_index: Option<usize>,
    pub customize_focus: usize,
    pub advanced_focus: usize,
    /// Clear All Data was pressed once and waits for confirmation
    pub confirm_clear: bool,
    pub history: HistoryState,
    pub preferences: Preferences,
    bridge: Arc<dyn HostBridge>,
    archive: Arc<dyn ArchiveStore>,
    scheduler: Box<dyn RevealScheduler>,
    /// Receiver for async messages; the event loop takes it
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Bridge calls still in flight
    pending_calls: Vec<JoinHandle<()>>,
    /// Tasks forwarding bridge events and state into the message channel
    listeners: Vec<JoinHandle<()>>,
    /// Current terminal width in columns
    pub terminal_width: u16,
    /// Current terminal height in rows
    pub terminal_height: u16,
}

impl App {
    /// Create the controller. The first view is onboarding until it has
    /// been completed once.
    pub fn new(services: AppServices, reveal: RevealConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let AppServices {
            bridge,
            preferences,
            archive,
            scheduler,
        } = services;

        let view = if preferences.onboarding_completed() {
            View::Main
        } else {
            View::Onboarding
        };
        let api_key_input = preferences.api_key();

        let mut app = Self {
            view,
            should_quit: false,
            needs_redraw: true,
            status_text: String::new(),
            session_started_at: None,
            click_through: false,
            session_initializing: false,
            bridge_state: BridgeState::Disconnected,
            onboarding_step: OnboardingStep::default(),
            api_key_input,
            api_key_error: None,
            message_input: String::new(),
            notice: None,
            reconciler: ResponseReconciler::new(),
            renderer: IncrementalRenderer::new(reveal),
            scroll: ScrollState::new(),
            displayed_index: None,
            customize_focus: 0,
            advanced_focus: 0,
            confirm_clear: false,
            history: HistoryState::default(),
            preferences,
            bridge,
            archive,
            scheduler,
            message_rx: Some(message_rx),
            message_tx,
            pending_calls: Vec::new(),
            listeners: Vec::new(),
            terminal_width: 80,
            terminal_height: 24,
        };
        app.refresh_response();
        app
    }

    /// Forward bridge events and connection changes into the message
    /// channel and announce the initial view to the host.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach(&mut self) {
        let mut events = self.bridge.subscribe();
        let tx = self.message_tx.clone();
        self.listeners.push(tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if tx.send(AppMessage::Host(event)).is_err() {
                    break;
                }
            }
        }));

        let mut state = self.bridge.state();
        self.bridge_state = state.borrow().clone();
        let tx = self.message_tx.clone();
        self.listeners.push(tokio::spawn(async move {
            while state.changed().await.is_ok() {
                let current = state.borrow_and_update().clone();
                if tx.send(AppMessage::BridgeState(current)).is_err() {
                    break;
                }
            }
        }));

        self.request(HostRequest::NotifyViewChanged {
            view: self.view.as_str().to_string(),
        });
    }

    /// Mark the UI as needing a redraw.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Quit without further host interaction.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Current reveal clock.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// True while the displayed response is still revealing.
    pub fn is_animating(&self) -> bool {
        self.renderer.is_animating(self.now_ms())
    }

    /// Expire timed notices.
    pub fn tick(&mut self, now: Instant) {
        if self
            .api_key_error
            .as_ref()
            .is_some_and(|e| e.is_expired(now))
        {
            self.api_key_error = None;
            self.mark_dirty();
        }
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
            self.mark_dirty();
        }
        if self.session_started_at.is_some() {
            // Session clock in the header
            self.mark_dirty();
        }
    }

    pub fn update_terminal_dimensions(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.mark_dirty();
    }

    /// Show a footer notice.
    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(TimedNotice::new(message, Instant::now(), NOTICE_TTL));
        self.mark_dirty();
    }

    /// Run a bridge call in the background. Failures are logged and
    /// reported back as [`AppMessage::CallFailed`].
    fn dispatch<F>(&mut self, method: &'static str, call: F)
    where
        F: Future<Output = Result<(), BridgeError>> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        let handle = tokio::spawn(async move {
            if let Err(error) = call.await {
                warn!("Bridge call {} failed: {}", method, error);
                let _ = tx.send(AppMessage::CallFailed { method, error });
            }
        });
        self.track(handle);
    }

    /// Issue a single host request in the background.
    fn request(&mut self, request: HostRequest) {
        let method = request.method();
        let bridge = Arc::clone(&self.bridge);
        debug!("Dispatching {}", method);
        self.dispatch(method, async move { bridge.call(request).await });
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.pending_calls.retain(|h| !h.is_finished());
        self.pending_calls.push(handle);
    }

    /// Number of bridge calls still in flight.
    pub fn pending_call_count(&self) -> usize {
        self.pending_calls.iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait for every in-flight bridge call, then apply the messages they
    /// produced (when the receiver has not been taken by the event loop).
    pub async fn settle(&mut self) {
        while !self.pending_calls.is_empty() {
            for handle in std::mem::take(&mut self.pending_calls) {
                if let Err(e) = handle.await {
                    warn!("Bridge task ended abnormally: {}", e);
                }
            }
            self.drain_messages();
        }
        self.drain_messages();
    }

    /// Apply every message already queued on the app's own receiver.
    pub fn drain_messages(&mut self) {
        let Some(mut rx) = self.message_rx.take() else {
            return;
        };
        while let Ok(msg) = rx.try_recv() {
            self.handle_message(msg);
        }
        self.message_rx = Some(rx);
    }

    /// Log and surface a failed preference write.
    fn persist(&mut self, result: Result<(), PreferenceError>) {
        let context = ErrorContext::new("save preference").with_view(self.view.as_str());
        if let Err(e) = result.context(context) {
            warn!("{} [{}]", e, e.error_code());
            self.show_notice(e.user_message());
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}
