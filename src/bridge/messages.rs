use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::models::{ImageQuality, Language, Profile, ScreenshotInterval, StealthLevel};

/// Events pushed by the host process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Free-form status line ("Listening...", "Ready", "Error: ...")
    Status { text: String },
    /// Full text of the in-progress (or a new) response turn
    Response { text: String },
    ClickThroughToggled { enabled: bool },
    /// True while the host is connecting to the AI session
    SessionInitializing { initializing: bool },
    NavigatePreviousResponse,
    NavigateNextResponse,
    ScrollResponseUp,
    ScrollResponseDown,
}

/// Calls the client makes on the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum HostRequest {
    InitializeSession {
        api_key: String,
        profile: Profile,
        language: Language,
    },
    StartCapture {
        interval: ScreenshotInterval,
        quality: ImageQuality,
    },
    StopCapture,
    SendTextMessage {
        text: String,
    },
    CloseSession,
    QuitApplication,
    ToggleWindowVisibility,
    OpenExternal {
        url: String,
    },
    UpdateContentProtection {
        enabled: bool,
    },
    SetStealthLevel {
        level: StealthLevel,
    },
    NotifyViewChanged {
        view: String,
    },
    NotifySizesChanged,
}

impl HostRequest {
    /// Wire name of the call, used in logs and errors.
    pub fn method(&self) -> &'static str {
        match self {
            HostRequest::InitializeSession { .. } => "initialize_session",
            HostRequest::StartCapture { .. } => "start_capture",
            HostRequest::StopCapture => "stop_capture",
            HostRequest::SendTextMessage { .. } => "send_text_message",
            HostRequest::CloseSession => "close_session",
            HostRequest::QuitApplication => "quit_application",
            HostRequest::ToggleWindowVisibility => "toggle_window_visibility",
            HostRequest::OpenExternal { .. } => "open_external",
            HostRequest::UpdateContentProtection { .. } => "update_content_protection",
            HostRequest::SetStealthLevel { .. } => "set_stealth_level",
            HostRequest::NotifyViewChanged { .. } => "notify_view_changed",
            HostRequest::NotifySizesChanged => "notify_sizes_changed",
        }
    }
}

/// A request as framed on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope<'a> {
    pub request_id: &'a str,
    #[serde(flatten)]
    pub request: &'a HostRequest,
}

/// Reply to a single request, matched by `request_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostReply {
    pub request_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Anything the host may send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InboundFrame {
    Reply(HostReply),
    Event(HostEvent),
}

/// Outcome of a text send as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    pub success: bool,
    pub error: Option<String>,
}

impl SendResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

impl From<Result<(), BridgeError>> for SendResult {
    fn from(result: Result<(), BridgeError>) -> Self {
        match result {
            Ok(()) => SendResult::ok(),
            Err(e) => SendResult::failed(e.user_message()),
        }
    }
}
