//! Host bridge trait abstraction.
//!
//! The application only talks to the host through [`HostBridge`], so the
//! WebSocket adapter can be swapped for the mock in tests.

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::bridge::{HostEvent, HostRequest};
use crate::error::BridgeError;
use crate::models::{ImageQuality, Language, Profile, ScreenshotInterval, StealthLevel};

/// Connection state of the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeState {
    Connected,
    Reconnecting { attempt: u8 },
    Disconnected,
}

/// Request/response channel to the host process plus its event stream.
///
/// Events are delivered to subscribers in the order the host sent them.
/// Two calls issued concurrently carry no ordering guarantee beyond their
/// own request/reply pairing.
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Issue a call and wait for the host's reply.
    ///
    /// Resolves to `Err(BridgeError::Rejected)` when the host answers with
    /// `success: false`.
    async fn call(&self, request: HostRequest) -> Result<(), BridgeError>;

    /// Subscribe to host events. Every event reaches every subscriber.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent>;

    /// Watch the connection state.
    fn state(&self) -> watch::Receiver<BridgeState>;

    fn shutdown(&self);

    async fn initialize_session(
        &self,
        api_key: &str,
        profile: Profile,
        language: Language,
    ) -> Result<(), BridgeError> {
        self.call(HostRequest::InitializeSession {
            api_key: api_key.to_string(),
            profile,
            language,
        })
        .await
    }

    async fn start_capture(
        &self,
        interval: ScreenshotInterval,
        quality: ImageQuality,
    ) -> Result<(), BridgeError> {
        self.call(HostRequest::StartCapture { interval, quality })
            .await
    }

    async fn stop_capture(&self) -> Result<(), BridgeError> {
        self.call(HostRequest::StopCapture).await
    }

    async fn send_text_message(&self, text: &str) -> Result<(), BridgeError> {
        self.call(HostRequest::SendTextMessage {
            text: text.to_string(),
        })
        .await
    }

    async fn close_session(&self) -> Result<(), BridgeError> {
        self.call(HostRequest::CloseSession).await
    }

    async fn quit_application(&self) -> Result<(), BridgeError> {
        self.call(HostRequest::QuitApplication).await
    }

    async fn open_external(&self, url: &str) -> Result<(), BridgeError> {
        self.call(HostRequest::OpenExternal {
            url: url.to_string(),
        })
        .await
    }

    async fn set_stealth_level(&self, level: StealthLevel) -> Result<(), BridgeError> {
        self.call(HostRequest::SetStealthLevel { level }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_state_equality() {
        assert_eq!(BridgeState::Connected, BridgeState::Connected);
        assert_ne!(
            BridgeState::Reconnecting { attempt: 1 },
            BridgeState::Reconnecting { attempt: 2 }
        );
        assert_ne!(BridgeState::Connected, BridgeState::Disconnected);
    }
}
