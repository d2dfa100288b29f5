//! Command definitions for keyboard input handling.
//!
//! The [`Command`] enum decouples key bindings from their effects. Which
//! commands a key produces depends on the active view; what a command does
//! is decided by [`App::handle_command`](crate::app::App::handle_command).

/// Every action a key press can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // =========================================================================
    // Global
    // =========================================================================
    /// Quit the application (Ctrl+C)
    Quit,
    /// Close the current view, ending the session from the assistant (Esc)
    Close,
    /// Ask the host to show or hide the window (Ctrl+\)
    ToggleVisibility,

    // =========================================================================
    // Header actions
    // =========================================================================
    OpenHelp,
    OpenCustomize,
    OpenHistory,
    OpenAdvanced,

    // =========================================================================
    // Onboarding
    // =========================================================================
    OnboardingNext,
    OnboardingPrev,
    /// Jump straight to the main view
    OnboardingSkip,

    // =========================================================================
    // Main view
    // =========================================================================
    StartSession,
    ToggleLayout,
    OpenApiKeyHelp,

    // =========================================================================
    // Text entry (API key on main, message on assistant)
    // =========================================================================
    InsertChar(char),
    Backspace,
    /// Send the typed message
    Submit,

    // =========================================================================
    // Assistant
    // =========================================================================
    PreviousResponse,
    NextResponse,
    ScrollUp,
    ScrollDown,
    SaveResponse,
    /// Open the n-th link of the displayed response (zero-based)
    OpenLink(usize),

    // =========================================================================
    // Forms and lists
    // =========================================================================
    FocusPrev,
    FocusNext,
    ValuePrev,
    ValueNext,
    /// Toggle, confirm or open the focused row
    Activate,
    /// Open the n-th help link (zero-based)
    OpenHelpLink(usize),

    /// Consume the key without doing anything
    Noop,
}

impl Command {
    /// Short human-readable name, used in the help view and debug logs.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Quit => "Quit",
            Command::Close => "Close / back",
            Command::ToggleVisibility => "Show or hide window",
            Command::OpenHelp => "Help",
            Command::OpenCustomize => "Customize",
            Command::OpenHistory => "History",
            Command::OpenAdvanced => "Advanced tools",
            Command::OnboardingNext => "Next",
            Command::OnboardingPrev => "Back",
            Command::OnboardingSkip => "Skip",
            Command::StartSession => "Start session",
            Command::ToggleLayout => "Toggle compact layout",
            Command::OpenApiKeyHelp => "Get an API key",
            Command::InsertChar(_) => "Type",
            Command::Backspace => "Delete character",
            Command::Submit => "Send message",
            Command::PreviousResponse => "Previous response",
            Command::NextResponse => "Next response",
            Command::ScrollUp => "Scroll up",
            Command::ScrollDown => "Scroll down",
            Command::SaveResponse => "Save response",
            Command::OpenLink(_) => "Open link",
            Command::FocusPrev => "Previous field",
            Command::FocusNext => "Next field",
            Command::ValuePrev => "Previous value",
            Command::ValueNext => "Next value",
            Command::Activate => "Select",
            Command::OpenHelpLink(_) => "Open help link",
            Command::Noop => "",
        }
    }
}
