//! Error category classification for unified error handling.
//!
//! Categories drive how the UI reacts to a failure: retry it silently or
//! surface it as status text.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Host bridge connectivity (connection refused, dropped socket, timeout).
    /// Generally transient and retryable.
    Bridge,

    /// The host process received the call and refused it.
    Host,

    /// Client-side errors (bugs, invalid state).
    Client,

    /// System/OS errors (filesystem, permissions).
    System,

    /// Persisted data problems (unreadable or corrupted stores).
    Storage,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Bridge)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Bridge => "bridge",
            ErrorCategory::Host => "host",
            ErrorCategory::Client => "client",
            ErrorCategory::System => "system",
            ErrorCategory::Storage => "storage",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Bridge => "Host connection issue",
            ErrorCategory::Host => "Host rejected the request",
            ErrorCategory::Client => "Application error",
            ErrorCategory::System => "System error",
            ErrorCategory::Storage => "Stored data problem",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Bridge => "Check that the host process is running.",
            ErrorCategory::Host => "Check the host logs for details.",
            ErrorCategory::Client => "Please report this issue.",
            ErrorCategory::System => "Check file permissions and available disk space.",
            ErrorCategory::Storage => "Clearing data from the Advanced view resets stored settings.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
