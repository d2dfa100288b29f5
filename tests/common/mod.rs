//! Common test utilities for integration tests.
//!
//! Builds an [`App`] wired to in-memory collaborators so a test can drive
//! it, inspect the calls it made and advance the reveal clock.
//!
//! # Example
//!
//! ```ignore
//! let mut t = TestAppBuilder::new().with_api_key("key-123").build();
//! t.app.start_session();
//! t.app.settle().await;
//! assert!(t.bridge.methods().contains(&"start_capture"));
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use cue::adapters::mock::{InMemoryArchive, InMemoryStore, ManualScheduler, MockHostBridge};
use cue::app::{App, AppServices};
use cue::bridge::HostEvent;
use cue::models::ConversationSession;
use cue::preferences::Preferences;
use cue::reveal::RevealConfig;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// An app plus handles on everything it talks to.
pub struct TestApp {
    pub app: App,
    pub bridge: MockHostBridge,
    pub store: InMemoryStore,
    pub archive: InMemoryArchive,
    pub clock: ManualScheduler,
}

impl TestApp {
    /// Deliver a response fragment the way the event loop would.
    pub fn response(&mut self, text: &str) {
        self.app.handle_host_event(HostEvent::Response {
            text: text.to_string(),
        });
    }

    pub fn status(&mut self, text: &str) {
        self.app.handle_host_event(HostEvent::Status {
            text: text.to_string(),
        });
    }

    /// Advance the reveal clock and apply every task that came due.
    pub fn run_reveal(&mut self, ms: u64) {
        for task in self.clock.advance(ms) {
            self.app.apply_reveal(task);
        }
    }

    /// Draw one frame and return the buffer.
    pub fn draw(&mut self, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        self.app.update_terminal_dimensions(width, height);
        terminal
            .draw(|frame| cue::ui::render(frame, &mut self.app))
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    /// Every row of a frame joined with newlines.
    pub fn screen(&mut self, width: u16, height: u16) -> String {
        let buffer = self.draw(width, height);
        screen_text(&buffer)
    }

    /// Apply whatever the background listeners forwarded, yielding to
    /// them until `done` holds or the attempts run out.
    pub async fn pump_until(&mut self, mut done: impl FnMut(&App) -> bool) -> bool {
        for _ in 0..50 {
            tokio::task::yield_now().await;
            self.app.drain_messages();
            if done(&self.app) {
                return true;
            }
        }
        false
    }
}

pub fn screen_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builder for test apps.
#[derive(Default)]
pub struct TestAppBuilder {
    values: Vec<(String, String)>,
    sessions: Vec<ConversationSession>,
    onboarded: bool,
    reveal: Option<RevealConfig>,
}

impl TestAppBuilder {
    /// Onboarded, no API key.
    pub fn new() -> Self {
        Self {
            onboarded: true,
            ..Self::default()
        }
    }

    /// First run: the app opens on the onboarding wizard.
    pub fn first_run() -> Self {
        Self::default()
    }

    pub fn with_api_key(self, key: &str) -> Self {
        self.with_value("apiKey", key)
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_session(mut self, session: ConversationSession) -> Self {
        self.sessions.push(session);
        self
    }

    pub fn with_reveal(mut self, reveal: RevealConfig) -> Self {
        self.reveal = Some(reveal);
        self
    }

    pub fn build(self) -> TestApp {
        let mut pairs: Vec<(&str, &str)> = self
            .values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if self.onboarded {
            pairs.push(("onboardingCompleted", "true"));
        }
        let store = InMemoryStore::with_values(pairs);
        let archive = InMemoryArchive::with_sessions(self.sessions);
        let bridge = MockHostBridge::new();
        let clock = ManualScheduler::new();

        let app = App::new(
            AppServices {
                bridge: Arc::new(bridge.clone()),
                preferences: Preferences::new(store.clone()),
                archive: Arc::new(archive.clone()),
                scheduler: Box::new(clock.clone()),
            },
            self.reveal.unwrap_or_default(),
        );

        TestApp {
            app,
            bridge,
            store,
            archive,
            clock,
        }
    }
}

/// An onboarded app holding a usable API key.
pub fn ready_app() -> TestApp {
    TestAppBuilder::new().with_api_key("key-123").build()
}
