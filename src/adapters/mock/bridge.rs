//! Mock host bridge for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::bridge::{EventHub, HostEvent, HostRequest};
use crate::error::BridgeError;
use crate::traits::{BridgeState, HostBridge};

/// Mock host bridge.
///
/// This mock allows:
/// - Injecting host events
/// - Inspecting every call made, in order
/// - Failing selected methods
///
/// # Example
///
/// ```ignore
/// let bridge = MockHostBridge::new();
/// bridge.fail_method("send_text_message", BridgeError::Rejected { .. });
/// bridge.inject_event(HostEvent::Status { text: "Ready".into() });
/// assert_eq!(bridge.methods(), vec!["notify_view_changed"]);
/// ```
#[derive(Clone)]
pub struct MockHostBridge {
    events: EventHub,
    state_tx: Arc<watch::Sender<BridgeState>>,
    calls: Arc<Mutex<Vec<HostRequest>>>,
    failures: Arc<Mutex<HashMap<&'static str, BridgeError>>>,
}

impl Default for MockHostBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHostBridge {
    /// Create a connected mock.
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(BridgeState::Connected);
        Self {
            events: EventHub::new(),
            state_tx: Arc::new(state_tx),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Deliver an event to all subscribers.
    pub fn inject_event(&self, event: HostEvent) {
        self.events.publish(event);
    }

    pub fn set_state(&self, state: BridgeState) {
        self.state_tx.send_replace(state);
    }

    /// Make every call to `method` fail with `error`.
    pub fn fail_method(&self, method: &'static str, error: BridgeError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(method, error);
    }

    pub fn clear_failures(&self) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<HostRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Method names of every call made so far.
    pub fn methods(&self) -> Vec<&'static str> {
        self.calls().iter().map(HostRequest::method).collect()
    }

    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[async_trait]
impl HostBridge for MockHostBridge {
    async fn call(&self, request: HostRequest) -> Result<(), BridgeError> {
        let method = request.method();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if *self.state_tx.borrow() == BridgeState::Disconnected {
            return Err(BridgeError::Disconnected);
        }

        match self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(method)
        {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        self.events.subscribe()
    }

    fn state(&self) -> watch::Receiver<BridgeState> {
        self.state_tx.subscribe()
    }

    fn shutdown(&self) {
        self.set_state(BridgeState::Disconnected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let bridge = MockHostBridge::new();
        bridge.stop_capture().await.unwrap();
        bridge.close_session().await.unwrap();
        assert_eq!(bridge.methods(), vec!["stop_capture", "close_session"]);
    }

    #[tokio::test]
    async fn test_configured_failure() {
        let bridge = MockHostBridge::new();
        bridge.fail_method(
            "send_text_message",
            BridgeError::Rejected {
                operation: "send_text_message".to_string(),
                message: "No active session".to_string(),
            },
        );
        let err = bridge.send_text_message("hi").await.unwrap_err();
        assert_eq!(err.user_message(), "No active session");
        assert!(bridge.stop_capture().await.is_ok());
    }

    #[tokio::test]
    async fn test_injected_events_reach_subscribers() {
        let bridge = MockHostBridge::new();
        let mut rx = bridge.subscribe();
        bridge.inject_event(HostEvent::Status {
            text: "Listening...".to_string(),
        });
        bridge.inject_event(HostEvent::NavigateNextResponse);
        assert!(matches!(rx.recv().await.unwrap(), HostEvent::Status { .. }));
        assert_eq!(rx.recv().await.unwrap(), HostEvent::NavigateNextResponse);
    }

    #[tokio::test]
    async fn test_disconnected_calls_fail() {
        let bridge = MockHostBridge::new();
        bridge.shutdown();
        assert_eq!(
            bridge.quit_application().await,
            Err(BridgeError::Disconnected)
        );
    }
}
