//! Lossless fan-out of host events to subscribers.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::debug;

use super::HostEvent;

#[derive(Default)]
struct HubInner {
    subscribers: Vec<mpsc::UnboundedSender<HostEvent>>,
    /// Events published before anyone subscribed.
    backlog: Vec<HostEvent>,
}

/// Delivers every published event to every live subscriber, in order.
///
/// Each subscriber owns an unbounded queue, so a slow reader delays its own
/// events but never loses them. Events published while nobody listens are
/// held and handed to the first subscriber.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for event in inner.backlog.drain(..) {
            let _ = tx.send(event);
        }
        inner.subscribers.push(tx);
        rx
    }

    pub fn publish(&self, event: HostEvent) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.subscribers.retain(|tx| !tx.is_closed());
        if inner.subscribers.is_empty() {
            debug!("No subscribers yet, holding {:?}", event);
            inner.backlog.push(event);
            return;
        }
        inner
            .subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }
}
