//! Default keybindings for the application.
//!
//! Bindings are layered: global keys work everywhere, header keys work on
//! the main view and every secondary view, and view keys only apply while
//! their view is displayed.

use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

use super::command::Command;
use crate::app::View;

/// Represents a key combination (key code + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Creates a key combo with no modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Creates a key combo with Control modifier.
    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Creates a key combo with Alt modifier.
    pub const fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    /// Display form such as `Ctrl+S` or `Alt+Left`.
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_uppercase().to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            other => format!("{:?}", other),
        };
        let mut parts = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }
        parts.push(&key);
        parts.join("+")
    }
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    /// Always active
    pub global: HashMap<KeyCombo, Command>,
    /// Active on the main view and the secondary views
    pub header: HashMap<KeyCombo, Command>,
    /// Keybindings per view
    pub view: HashMap<View, HashMap<KeyCombo, Command>>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingConfig {
    /// Creates a new keybinding configuration with default bindings.
    pub fn new() -> Self {
        let mut config = Self {
            global: HashMap::new(),
            header: HashMap::new(),
            view: HashMap::new(),
        };

        config.setup_global_bindings();
        config.setup_header_bindings();
        config.setup_onboarding_bindings();
        config.setup_main_bindings();
        config.setup_assistant_bindings();
        config.setup_form_bindings();
        config.setup_history_bindings();
        config.setup_help_bindings();

        config
    }

    fn setup_global_bindings(&mut self) {
        self.global
            .insert(KeyCombo::ctrl(KeyCode::Char('c')), Command::Quit);
        self.global
            .insert(KeyCombo::ctrl(KeyCode::Char('\\')), Command::ToggleVisibility);
        self.global
            .insert(KeyCombo::plain(KeyCode::Esc), Command::Close);
    }

    fn setup_header_bindings(&mut self) {
        self.header
            .insert(KeyCombo::plain(KeyCode::F(1)), Command::OpenHelp);
        self.header
            .insert(KeyCombo::plain(KeyCode::F(2)), Command::OpenCustomize);
        self.header
            .insert(KeyCombo::plain(KeyCode::F(3)), Command::OpenHistory);
        self.header
            .insert(KeyCombo::plain(KeyCode::F(4)), Command::OpenAdvanced);
    }

    fn setup_onboarding_bindings(&mut self) {
        let bindings = self.view.entry(View::Onboarding).or_default();
        bindings.insert(KeyCombo::plain(KeyCode::Enter), Command::OnboardingNext);
        bindings.insert(KeyCombo::plain(KeyCode::Right), Command::OnboardingNext);
        bindings.insert(KeyCombo::plain(KeyCode::Left), Command::OnboardingPrev);
        bindings.insert(KeyCombo::plain(KeyCode::Char('s')), Command::OnboardingSkip);
    }

    fn setup_main_bindings(&mut self) {
        let bindings = self.view.entry(View::Main).or_default();
        bindings.insert(KeyCombo::plain(KeyCode::Enter), Command::StartSession);
        bindings.insert(KeyCombo::plain(KeyCode::Backspace), Command::Backspace);
        bindings.insert(KeyCombo::ctrl(KeyCode::Char('l')), Command::ToggleLayout);
        bindings.insert(KeyCombo::ctrl(KeyCode::Char('g')), Command::OpenApiKeyHelp);
    }

    fn setup_assistant_bindings(&mut self) {
        let bindings = self.view.entry(View::Assistant).or_default();
        bindings.insert(KeyCombo::plain(KeyCode::Enter), Command::Submit);
        bindings.insert(KeyCombo::plain(KeyCode::Backspace), Command::Backspace);

        bindings.insert(KeyCombo::ctrl(KeyCode::Left), Command::PreviousResponse);
        bindings.insert(KeyCombo::alt(KeyCode::Left), Command::PreviousResponse);
        bindings.insert(KeyCombo::ctrl(KeyCode::Right), Command::NextResponse);
        bindings.insert(KeyCombo::alt(KeyCode::Right), Command::NextResponse);

        bindings.insert(KeyCombo::plain(KeyCode::Up), Command::ScrollUp);
        bindings.insert(KeyCombo::plain(KeyCode::PageUp), Command::ScrollUp);
        bindings.insert(KeyCombo::plain(KeyCode::Down), Command::ScrollDown);
        bindings.insert(KeyCombo::plain(KeyCode::PageDown), Command::ScrollDown);

        bindings.insert(KeyCombo::ctrl(KeyCode::Char('s')), Command::SaveResponse);

        for (index, digit) in ('1'..='9').enumerate() {
            bindings.insert(KeyCombo::alt(KeyCode::Char(digit)), Command::OpenLink(index));
        }
    }

    fn setup_form_bindings(&mut self) {
        for view in [View::Customize, View::Advanced] {
            let bindings = self.view.entry(view).or_default();
            bindings.insert(KeyCombo::plain(KeyCode::Up), Command::FocusPrev);
            bindings.insert(KeyCombo::plain(KeyCode::Down), Command::FocusNext);
            bindings.insert(KeyCombo::plain(KeyCode::Left), Command::ValuePrev);
            bindings.insert(KeyCombo::plain(KeyCode::Right), Command::ValueNext);
            bindings.insert(KeyCombo::plain(KeyCode::Enter), Command::Activate);
            bindings.insert(KeyCombo::plain(KeyCode::Char(' ')), Command::Activate);
        }
    }

    fn setup_history_bindings(&mut self) {
        let bindings = self.view.entry(View::History).or_default();
        bindings.insert(KeyCombo::plain(KeyCode::Up), Command::FocusPrev);
        bindings.insert(KeyCombo::plain(KeyCode::Down), Command::FocusNext);
        bindings.insert(KeyCombo::plain(KeyCode::Enter), Command::Activate);
    }

    fn setup_help_bindings(&mut self) {
        let bindings = self.view.entry(View::Help).or_default();
        for (index, digit) in ('1'..='9').enumerate() {
            bindings.insert(KeyCombo::plain(KeyCode::Char(digit)), Command::OpenHelpLink(index));
        }
    }

    pub fn get_global(&self, combo: &KeyCombo) -> Option<&Command> {
        self.global.get(combo)
    }

    pub fn get_header(&self, combo: &KeyCombo) -> Option<&Command> {
        self.header.get(combo)
    }

    /// Gets the view-specific command for a key combo.
    pub fn get_view(&self, view: View, combo: &KeyCombo) -> Option<&Command> {
        self.view.get(&view).and_then(|m| m.get(combo))
    }

    /// First key bound to `command` in any layer, for on-screen hints.
    pub fn key_for(&self, view: View, command: &Command) -> Option<KeyCombo> {
        let find = |map: &HashMap<KeyCombo, Command>| {
            let mut keys: Vec<KeyCombo> = map
                .iter()
                .filter(|(_, c)| *c == command)
                .map(|(k, _)| *k)
                .collect();
            keys.sort_by_key(|k| k.label());
            keys.into_iter().next()
        };
        self.view
            .get(&view)
            .and_then(find)
            .or_else(|| find(&self.header))
            .or_else(|| find(&self.global))
    }
}
