//! AppMessage enum for async communication within the application.

use crate::bridge::{HostEvent, SendResult};
use crate::error::BridgeError;
use crate::traits::BridgeState;

/// Messages delivered to the controller from background tasks.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// An event pushed by the host.
    Host(HostEvent),
    /// Bridge connection state changed.
    BridgeState(BridgeState),
    /// A text message send finished.
    SendFinished(SendResult),
    /// A best-effort bridge call failed.
    CallFailed {
        method: &'static str,
        error: BridgeError,
    },
    /// A session start sequence finished.
    SessionStarted { success: bool },
    /// The host acknowledged quitting; the TUI can exit.
    QuitAcknowledged,
}
