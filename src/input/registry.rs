//! Command registry for dispatching keyboard input to commands.
//!
//! The [`CommandRegistry`] maps key events to commands based on the view
//! currently displayed.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::command::Command;
use super::keybindings::{KeyCombo, KeybindingConfig};
use crate::app::View;

/// Registry for dispatching key events to commands.
///
/// Priority:
/// 1. Ctrl+C, always
/// 2. Global bindings
/// 3. View bindings
/// 4. Header bindings (main and secondary views only)
/// 5. Character input on the views with a text field
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    config: KeybindingConfig,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            config: KeybindingConfig::new(),
        }
    }

    pub fn with_config(config: KeybindingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeybindingConfig {
        &self.config
    }

    /// Dispatches a key event to a command for the given view.
    ///
    /// Returns `None` if the key should be ignored.
    pub fn dispatch(&self, key: KeyEvent, view: View) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }

        let combo = KeyCombo::new(key.code, key.modifiers);

        if let Some(cmd) = self.config.get_global(&combo) {
            return Some(cmd.clone());
        }

        if let Some(cmd) = self.config.get_view(view, &combo) {
            return Some(cmd.clone());
        }

        if view == View::Main || view.is_secondary() {
            if let Some(cmd) = self.config.get_header(&combo) {
                return Some(cmd.clone());
            }
        }

        if has_text_field(view) {
            if let KeyCode::Char(c) = key.code {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
                {
                    return Some(Command::InsertChar(c));
                }
            }
        }

        None
    }
}

fn has_text_field(view: View) -> bool {
    matches!(view, View::Main | View::Assistant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let registry = CommandRegistry::new();
        let ctrl_c = key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for view in [View::Onboarding, View::Main, View::Assistant, View::Help] {
            assert_eq!(registry.dispatch(ctrl_c, view), Some(Command::Quit));
        }
    }

    #[test]
    fn test_escape_closes() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.dispatch(key(KeyCode::Esc), View::Assistant),
            Some(Command::Close)
        );
    }

    #[test]
    fn test_text_entry_on_main_and_assistant() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.dispatch(key(KeyCode::Char('a')), View::Main),
            Some(Command::InsertChar('a'))
        );
        let shifted = key_with(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            registry.dispatch(shifted, View::Assistant),
            Some(Command::InsertChar('A'))
        );
        assert_eq!(registry.dispatch(key(KeyCode::Char('a')), View::Customize), None);
    }

    #[test]
    fn test_onboarding_skip_is_not_text() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.dispatch(key(KeyCode::Char('s')), View::Onboarding),
            Some(Command::OnboardingSkip)
        );
    }

    #[test]
    fn test_header_keys_limited_to_main_and_secondary() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.dispatch(key(KeyCode::F(1)), View::Main),
            Some(Command::OpenHelp)
        );
        assert_eq!(
            registry.dispatch(key(KeyCode::F(3)), View::Customize),
            Some(Command::OpenHistory)
        );
        assert_eq!(registry.dispatch(key(KeyCode::F(1)), View::Assistant), None);
        assert_eq!(registry.dispatch(key(KeyCode::F(1)), View::Onboarding), None);
    }

    #[test]
    fn test_ctrl_chars_are_not_inserted() {
        let registry = CommandRegistry::new();
        let ctrl_x = key_with(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(registry.dispatch(ctrl_x, View::Assistant), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let registry = CommandRegistry::new();
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(registry.dispatch(release, View::Main), None);
    }
}
