//! Message, host event and command handlers for the App.

use tracing::{debug, info, warn};

use super::{App, AppMessage, View};
use crate::bridge::HostEvent;
use crate::error::{CueError, ErrorContext};
use crate::input::Command;

impl App {
    /// Apply one message produced by a background task or listener.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Host(event) => self.handle_host_event(event),
            AppMessage::BridgeState(state) => {
                debug!("Bridge state: {:?}", state);
                self.bridge_state = state;
                self.mark_dirty();
            }
            AppMessage::SendFinished(result) => self.on_send_finished(result),
            AppMessage::CallFailed { method, error } => {
                let error = CueError::from(error).with_context(
                    ErrorContext::new(method)
                        .with_view(self.view.as_str())
                        .with_component("bridge"),
                );
                warn!("{} [{}]", error, error.error_code());
                self.status_text = format!("Error: {}", error.user_message());
                self.mark_dirty();
            }
            AppMessage::SessionStarted { success } => {
                if success {
                    debug!("Session started");
                } else {
                    info!("Session did not start");
                }
            }
            AppMessage::QuitAcknowledged => {
                self.should_quit = true;
            }
        }
    }

    /// Apply an event pushed by the host.
    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Status { text } => {
                self.reconciler.on_status(&text);
                self.status_text = text;
            }
            HostEvent::Response { text } => {
                self.reconciler.on_fragment(&text);
                self.refresh_response();
            }
            HostEvent::ClickThroughToggled { enabled } => {
                self.click_through = enabled;
            }
            HostEvent::SessionInitializing { initializing } => {
                self.session_initializing = initializing;
            }
            HostEvent::NavigatePreviousResponse => self.previous_response(),
            HostEvent::NavigateNextResponse => self.next_response(),
            HostEvent::ScrollResponseUp => self.scroll_response_up(),
            HostEvent::ScrollResponseDown => self.scroll_response_down(),
        }
        self.mark_dirty();
    }

    /// Insert pasted text into whichever text field the view shows.
    pub fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            match self.view {
                View::Main => self.api_key_insert(c),
                View::Assistant => self.message_insert(c),
                _ => return,
            }
        }
    }

    /// Execute a command in the context of the current view.
    ///
    /// Commands that make no sense for the view are ignored.
    pub fn handle_command(&mut self, cmd: Command) {
        debug!("Command {:?} on {}", cmd, self.view.as_str());
        match cmd {
            Command::Quit => self.request_quit(),
            Command::Close => {
                if self.view == View::History && self.history_close_detail() {
                    return;
                }
                self.close();
            }
            Command::ToggleVisibility => self.toggle_visibility(),
            Command::OpenHelp => self.open_help(),
            Command::OpenCustomize => self.open_customize(),
            Command::OpenHistory => self.open_history(),
            Command::OpenAdvanced => self.open_advanced(),
            Command::Noop => {}
            other => match self.view {
                View::Onboarding => self.handle_onboarding_command(other),
                View::Main => self.handle_main_command(other),
                View::Assistant => self.handle_assistant_command(other),
                View::Customize | View::Advanced => self.handle_form_command(other),
                View::History => self.handle_history_command(other),
                View::Help => {
                    if let Command::OpenHelpLink(index) = other {
                        self.open_help_link(index);
                    }
                }
            },
        }
    }

    fn handle_onboarding_command(&mut self, cmd: Command) {
        match cmd {
            Command::OnboardingNext => self.onboarding_next(),
            Command::OnboardingPrev => self.onboarding_prev(),
            Command::OnboardingSkip => self.complete_onboarding(),
            _ => {}
        }
    }

    fn handle_main_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartSession => {
                self.start_session();
            }
            Command::InsertChar(c) => self.api_key_insert(c),
            Command::Backspace => self.api_key_backspace(),
            Command::ToggleLayout => self.toggle_layout_mode(),
            Command::OpenApiKeyHelp => self.open_api_key_help(),
            _ => {}
        }
    }

    fn handle_assistant_command(&mut self, cmd: Command) {
        match cmd {
            Command::InsertChar(c) => self.message_insert(c),
            Command::Backspace => self.message_backspace(),
            Command::Submit => self.send_text(),
            Command::PreviousResponse => self.previous_response(),
            Command::NextResponse => self.next_response(),
            Command::ScrollUp => self.scroll_response_up(),
            Command::ScrollDown => self.scroll_response_down(),
            Command::SaveResponse => self.save_current_response(),
            Command::OpenLink(index) => self.open_response_link(index),
            _ => {}
        }
    }

    fn handle_form_command(&mut self, cmd: Command) {
        match cmd {
            Command::FocusPrev => self.settings_focus(false),
            Command::FocusNext => self.settings_focus(true),
            Command::ValuePrev => self.settings_change(false),
            Command::ValueNext => self.settings_change(true),
            Command::Activate => self.settings_activate(),
            _ => {}
        }
    }

    fn handle_history_command(&mut self, cmd: Command) {
        match cmd {
            Command::FocusPrev => self.history_move(false),
            Command::FocusNext => self.history_move(true),
            Command::Activate => self.history_open_selected(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::harness;
    use crate::bridge::HostRequest;
    use crate::error::BridgeError;

    #[tokio::test]
    async fn test_quit_acknowledged_sets_should_quit() {
        let mut h = harness();
        h.app.handle_command(Command::Quit);
        assert!(!h.app.should_quit);
        h.app.settle().await;
        assert!(h.app.should_quit);
        assert!(h.bridge.calls().contains(&HostRequest::QuitApplication));
    }

    #[tokio::test]
    async fn test_host_flags_are_mirrored() {
        let mut h = harness();
        h.app.handle_host_event(HostEvent::ClickThroughToggled { enabled: true });
        h.app.handle_host_event(HostEvent::SessionInitializing { initializing: true });
        assert!(h.app.click_through);
        assert!(h.app.session_initializing);
    }

    #[tokio::test]
    async fn test_call_failed_message_sets_status() {
        let mut h = harness();
        h.app.handle_message(AppMessage::CallFailed {
            method: "stop_capture",
            error: BridgeError::Disconnected,
        });
        assert_eq!(h.app.status_text, "Error: Lost connection to the host");
    }

    #[tokio::test]
    async fn test_typing_goes_to_the_views_field() {
        let mut h = harness();
        h.app.api_key_input.clear();
        h.app.handle_command(Command::InsertChar('k'));
        assert_eq!(h.app.api_key_input, "k");

        h.app.handle_command(Command::StartSession);
        assert_eq!(h.app.view, View::Assistant);
        h.app.handle_command(Command::InsertChar('h'));
        h.app.handle_command(Command::InsertChar('i'));
        h.app.handle_command(Command::Backspace);
        assert_eq!(h.app.message_input, "h");
        assert_eq!(h.app.api_key_input, "k");
    }

    #[tokio::test]
    async fn test_paste_filters_control_characters() {
        let mut h = harness();
        h.app.api_key_input.clear();
        h.app.paste("ab\ncd");
        assert_eq!(h.app.api_key_input, "abcd");
    }

    #[tokio::test]
    async fn test_commands_for_other_views_are_ignored() {
        let mut h = harness();
        h.app.handle_command(Command::SaveResponse);
        h.app.handle_command(Command::Submit);
        h.app.settle().await;
        assert_eq!(h.app.view, View::Main);
        assert!(h.bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_help_link_opens_external() {
        let mut h = harness();
        h.app.handle_command(Command::OpenHelp);
        h.app.handle_command(Command::OpenHelpLink(0));
        h.app.settle().await;
        assert!(h.bridge.calls().contains(&HostRequest::OpenExternal {
            url: crate::app::API_KEY_HELP_URL.to_string()
        }));
    }
}
