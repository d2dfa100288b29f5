//! Host bridge error types.
//!
//! Errors raised while talking to the host process: connecting, sending
//! requests, waiting for replies, or having a request refused.

use std::fmt;

/// Host bridge error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// Could not reach the host.
    ConnectionFailed { url: String, message: String },

    /// The connection dropped while a call was pending.
    Disconnected,

    /// Writing the request to the host failed.
    SendFailed { message: String },

    /// No reply arrived in time.
    Timeout { operation: String, duration_secs: u64 },

    /// The host answered with `success: false`.
    Rejected { operation: String, message: String },

    /// The host sent something that could not be decoded.
    Protocol { message: String },
}

impl BridgeError {
    /// Check if the failed call may succeed when issued again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BridgeError::ConnectionFailed { .. }
                | BridgeError::Disconnected
                | BridgeError::Timeout { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            BridgeError::ConnectionFailed { url, .. } => {
                format!("Could not connect to the host at {}", url)
            }
            BridgeError::Disconnected => "Lost connection to the host".to_string(),
            BridgeError::SendFailed { .. } => "Could not deliver the request to the host".to_string(),
            BridgeError::Timeout { operation, .. } => {
                format!("The host did not answer '{}' in time", operation)
            }
            BridgeError::Rejected { message, .. } => message.clone(),
            BridgeError::Protocol { .. } => "The host sent an unreadable message".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            BridgeError::ConnectionFailed { .. } => "E_BRIDGE_CONNECT",
            BridgeError::Disconnected => "E_BRIDGE_DISCONNECTED",
            BridgeError::SendFailed { .. } => "E_BRIDGE_SEND",
            BridgeError::Timeout { .. } => "E_BRIDGE_TIMEOUT",
            BridgeError::Rejected { .. } => "E_BRIDGE_REJECTED",
            BridgeError::Protocol { .. } => "E_BRIDGE_PROTOCOL",
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::ConnectionFailed { url, message } => {
                write!(f, "Connection to {} failed: {}", url, message)
            }
            BridgeError::Disconnected => write!(f, "Disconnected from host"),
            BridgeError::SendFailed { message } => write!(f, "Send failed: {}", message),
            BridgeError::Timeout {
                operation,
                duration_secs,
            } => write!(f, "{} timed out after {}s", operation, duration_secs),
            BridgeError::Rejected { operation, message } => {
                write!(f, "{} rejected by host: {}", operation, message)
            }
            BridgeError::Protocol { message } => write!(f, "Protocol error: {}", message),
        }
    }
}

impl std::error::Error for BridgeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_error_display() {
        assert_eq!(BridgeError::Disconnected.to_string(), "Disconnected from host");
        assert_eq!(
            BridgeError::Timeout {
                operation: "close_session".to_string(),
                duration_secs: 10,
            }
            .to_string(),
            "close_session timed out after 10s"
        );
        assert_eq!(
            BridgeError::Rejected {
                operation: "send_text_message".to_string(),
                message: "no session".to_string(),
            }
            .to_string(),
            "send_text_message rejected by host: no session"
        );
    }

    #[test]
    fn test_rejected_user_message_is_host_text() {
        let err = BridgeError::Rejected {
            operation: "send_text_message".to_string(),
            message: "Session not active".to_string(),
        };
        assert_eq!(err.user_message(), "Session not active");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_connectivity_errors_are_retryable() {
        assert!(BridgeError::Disconnected.is_retryable());
        assert!(BridgeError::ConnectionFailed {
            url: "ws://127.0.0.1:1".to_string(),
            message: "refused".to_string(),
        }
        .is_retryable());
        assert!(!BridgeError::Protocol {
            message: "bad json".to_string()
        }
        .is_retryable());
    }
}
