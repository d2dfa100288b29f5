//! Unified error handling.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain-specific Errors**: bridge, storage, UI, and system errors
//! - **Unified Error Type**: `CueError` consolidates all error types
//! - **Error Context**: operation and view attached for logging
//!
//! Nothing in the UI treats these as fatal: bridge failures become status
//! text, storage failures fall back to defaults, and only terminal setup
//! errors end the process.

mod bridge;
mod category;
mod context;
mod cue_error;
mod result;
mod storage;
mod system;
mod ui;

pub use bridge::BridgeError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use cue_error::CueError;
pub use result::{CueResult, ResultExt};
pub use storage::StorageError;
pub use system::{classify_io_error, SystemError};
pub use ui::UiError;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let bridge: CueError = BridgeError::Disconnected.into();
        let rejected: CueError = BridgeError::Rejected {
            operation: "send_text_message".to_string(),
            message: "no session".to_string(),
        }
        .into();
        let storage: CueError = StorageError::Corrupted {
            what: "saved responses".to_string(),
            message: "expected value".to_string(),
        }
        .into();
        let system: CueError = SystemError::NoHomeDirectory.into();

        assert_eq!(bridge.category(), ErrorCategory::Bridge);
        assert_eq!(rejected.category(), ErrorCategory::Host);
        assert_eq!(storage.category(), ErrorCategory::Storage);
        assert_eq!(system.category(), ErrorCategory::System);

        for err in [&bridge, &rejected, &storage, &system] {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_context_propagation() {
        let err: CueError = BridgeError::Timeout {
            operation: "close_session".to_string(),
            duration_secs: 10,
        }
        .into();

        let with_ctx = err.with_context(
            ErrorContext::new("close")
                .with_view("assistant")
                .with_component("app"),
        );

        let ctx = with_ctx.context().expect("context attached");
        assert_eq!(ctx.operation, "close");
        assert_eq!(ctx.view.as_deref(), Some("assistant"));
        assert!(with_ctx.is_retryable());
        assert_eq!(with_ctx.error_code(), "E_BRIDGE_TIMEOUT");
        assert!(with_ctx.to_string().contains("view=assistant"));
    }

    #[test]
    fn test_result_ext() {
        fn might_fail() -> Result<(), BridgeError> {
            Err(BridgeError::Disconnected)
        }

        let err = might_fail()
            .context(ErrorContext::new("start_capture"))
            .unwrap_err();
        assert_eq!(err.context().unwrap().operation, "start_capture");
        assert!(matches!(err.inner(), CueError::Bridge(BridgeError::Disconnected)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: CueError = json_err.into();
        assert!(matches!(err, CueError::Storage(StorageError::Corrupted { .. })));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: CueError = io_err.into();
        assert_eq!(err.category(), ErrorCategory::System);
    }
}
