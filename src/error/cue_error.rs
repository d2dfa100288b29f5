//! Unified error type for the cue application.

use std::fmt;

use super::bridge::BridgeError;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::storage::StorageError;
use super::system::SystemError;
use super::ui::UiError;

/// Unified error type.
///
/// Consolidates the domain errors so callers can log, categorize and
/// surface any failure the same way.
#[derive(Debug)]
pub enum CueError {
    /// Host bridge errors.
    Bridge(BridgeError),

    /// Preference store and archive errors.
    Storage(StorageError),

    /// UI/terminal errors.
    Ui(UiError),

    /// System/filesystem errors.
    System(SystemError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<CueError>,
        context: ErrorContext,
    },
}

impl CueError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CueError::Bridge(BridgeError::Rejected { .. }) => ErrorCategory::Host,
            CueError::Bridge(BridgeError::Protocol { .. }) => ErrorCategory::Client,
            CueError::Bridge(_) => ErrorCategory::Bridge,
            CueError::Storage(_) => ErrorCategory::Storage,
            CueError::Ui(_) | CueError::System(_) => ErrorCategory::System,
            CueError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            CueError::Bridge(err) => err.is_retryable(),
            CueError::WithContext { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            CueError::Bridge(err) => err.user_message(),
            CueError::Storage(err) => err.user_message(),
            CueError::Ui(err) => err.user_message(),
            CueError::System(err) => err.user_message(),
            CueError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CueError::Bridge(err) => err.error_code(),
            CueError::Storage(err) => err.error_code(),
            CueError::Ui(err) => err.error_code(),
            CueError::System(err) => err.error_code(),
            CueError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        CueError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            CueError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &CueError {
        match self {
            CueError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for CueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueError::Bridge(err) => write!(f, "{}", err),
            CueError::Storage(err) => write!(f, "{}", err),
            CueError::Ui(err) => write!(f, "{}", err),
            CueError::System(err) => write!(f, "{}", err),
            CueError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for CueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CueError::Bridge(err) => Some(err),
            CueError::Storage(err) => Some(err),
            CueError::Ui(err) => Some(err),
            CueError::System(err) => Some(err),
            CueError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<BridgeError> for CueError {
    fn from(err: BridgeError) -> Self {
        CueError::Bridge(err)
    }
}

impl From<StorageError> for CueError {
    fn from(err: StorageError) -> Self {
        CueError::Storage(err)
    }
}

impl From<UiError> for CueError {
    fn from(err: UiError) -> Self {
        CueError::Ui(err)
    }
}

impl From<SystemError> for CueError {
    fn from(err: SystemError) -> Self {
        CueError::System(err)
    }
}

impl From<std::io::Error> for CueError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        CueError::System(classify_io_error(err, None, "I/O operation"))
    }
}

impl From<serde_json::Error> for CueError {
    fn from(err: serde_json::Error) -> Self {
        CueError::Storage(StorageError::Corrupted {
            what: "JSON".to_string(),
            message: err.to_string(),
        })
    }
}
