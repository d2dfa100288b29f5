//! UI-related error types.
//!
//! Errors that occur while taking over or handing back the terminal.

use std::fmt;

/// UI-specific error variants.
#[derive(Debug, Clone)]
pub enum UiError {
    /// Terminal initialization failed.
    TerminalInitFailed { message: String },

    /// Terminal restore failed.
    TerminalRestoreFailed { message: String },
}

impl UiError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            UiError::TerminalInitFailed { .. } => {
                "Failed to initialize the terminal. Please check your terminal settings.".to_string()
            }
            UiError::TerminalRestoreFailed { .. } => {
                "Failed to restore terminal. You may need to reset your terminal settings.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            UiError::TerminalInitFailed { .. } => "E_UI_TERM_INIT",
            UiError::TerminalRestoreFailed { .. } => "E_UI_TERM_RESTORE",
        }
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::TerminalInitFailed { message } => {
                write!(f, "Terminal initialization failed: {}", message)
            }
            UiError::TerminalRestoreFailed { message } => {
                write!(f, "Terminal restore failed: {}", message)
            }
        }
    }
}

impl std::error::Error for UiError {}
