//! WebSocket host bridge.
//!
//! One background task owns the socket. It forwards inbound events to every
//! subscriber in arrival order, routes replies to the waiting call by
//! request id, and reconnects with exponential backoff when the host goes
//! away. Calls in flight when the connection drops fail with
//! [`BridgeError::Disconnected`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, watch, Notify};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::bridge::{
    EventHub, HostEvent, HostReply, HostRequest, InboundFrame, RequestEnvelope, DEFAULT_BRIDGE_URL,
    DEFAULT_CALL_TIMEOUT_SECS,
};
use crate::error::BridgeError;
use crate::traits::{BridgeState, HostBridge};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type ReplySender = oneshot::Sender<Result<HostReply, BridgeError>>;
type PendingCalls = Arc<Mutex<HashMap<String, ReplySender>>>;

/// A serialized request waiting for the socket.
#[derive(Debug)]
struct OutgoingFrame {
    request_id: String,
    json: String,
}

/// Configuration for the WebSocket bridge.
#[derive(Debug, Clone)]
pub struct WsBridgeConfig {
    pub url: String,
    pub max_retries: u8,
    pub max_backoff_secs: u64,
    pub call_timeout: Duration,
}

impl Default for WsBridgeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BRIDGE_URL.to_string(),
            max_retries: 5,
            max_backoff_secs: 30,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }
}

impl WsBridgeConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

/// Backoff before reconnection `attempt` (1-based): 1s, 2s, 4s, ... capped.
pub fn backoff_secs(attempt: u8, max_backoff_secs: u64) -> u64 {
    let shift = u32::from(attempt.saturating_sub(1)).min(32);
    std::cmp::min(1u64 << shift, max_backoff_secs)
}

/// Host bridge over a JSON WebSocket.
pub struct WsHostBridge {
    config: WsBridgeConfig,
    outgoing_tx: mpsc::Sender<OutgoingFrame>,
    pending: PendingCalls,
    events: EventHub,
    state_rx: watch::Receiver<BridgeState>,
    shutdown: Arc<AtomicBool>,
    shutdown_notify: Arc<Notify>,
}

impl WsHostBridge {
    /// Connect to the host.
    ///
    /// Fails if the first connection attempt fails; later drops are retried
    /// in the background.
    pub async fn connect(config: WsBridgeConfig) -> Result<Self, BridgeError> {
        let (ws_stream, _) =
            connect_async(config.url.as_str())
                .await
                .map_err(|e| BridgeError::ConnectionFailed {
                    url: config.url.clone(),
                    message: e.to_string(),
                })?;

        info!("Connected to host bridge at {}", config.url);

        let (ws_sink, ws_source) = ws_stream.split();
        let (outgoing_tx, outgoing_rx) = mpsc::channel::<OutgoingFrame>(100);
        let events = EventHub::new();
        let (state_tx, state_rx) = watch::channel(BridgeState::Connected);
        let pending: PendingCalls = Arc::new(Mutex::new(HashMap::new()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_notify = Arc::new(Notify::new());

        let connection = Connection {
            config: config.clone(),
            events: events.clone(),
            pending: pending.clone(),
            state_tx,
            shutdown: shutdown.clone(),
            shutdown_notify: shutdown_notify.clone(),
        };
        tokio::spawn(async move {
            connection.run(ws_sink, ws_source, outgoing_rx).await;
        });

        Ok(Self {
            config,
            outgoing_tx,
            pending,
            events,
            state_rx,
            shutdown,
            shutdown_notify,
        })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn forget(&self, request_id: &str) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(request_id);
    }
}

#[async_trait]
impl HostBridge for WsHostBridge {
    async fn call(&self, request: HostRequest) -> Result<(), BridgeError> {
        if *self.state_rx.borrow() == BridgeState::Disconnected {
            return Err(BridgeError::Disconnected);
        }

        let operation = request.method();
        let request_id = Uuid::new_v4().to_string();
        let json = serde_json::to_string(&RequestEnvelope {
            request_id: &request_id,
            request: &request,
        })
        .map_err(|e| BridgeError::Protocol {
            message: e.to_string(),
        })?;
        let frame = OutgoingFrame {
            request_id: request_id.clone(),
            json,
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request_id.clone(), reply_tx);

        debug!("-> {} ({})", operation, request_id);
        if let Err(e) = self.outgoing_tx.send(frame).await {
            self.forget(&request_id);
            return Err(BridgeError::SendFailed {
                message: e.to_string(),
            });
        }

        match tokio::time::timeout(self.config.call_timeout, reply_rx).await {
            Err(_) => {
                self.forget(&request_id);
                warn!("{} timed out after {:?}", operation, self.config.call_timeout);
                Err(BridgeError::Timeout {
                    operation: operation.to_string(),
                    duration_secs: self.config.call_timeout.as_secs(),
                })
            }
            Ok(Err(_)) => Err(BridgeError::Disconnected),
            Ok(Ok(Err(e))) => Err(e),
            Ok(Ok(Ok(reply))) if reply.success => Ok(()),
            Ok(Ok(Ok(reply))) => Err(BridgeError::Rejected {
                operation: operation.to_string(),
                message: reply
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string()),
            }),
        }
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<HostEvent> {
        self.events.subscribe()
    }

    fn state(&self) -> watch::Receiver<BridgeState> {
        self.state_rx.clone()
    }

    fn shutdown(&self) {
        info!("Shutting down host bridge");
        self.shutdown.store(true, Ordering::SeqCst);
        self.shutdown_notify.notify_one();
    }
}

impl Drop for WsHostBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// State owned by the background connection task.
struct Connection {
    config: WsBridgeConfig,
    events: EventHub,
    pending: PendingCalls,
    state_tx: watch::Sender<BridgeState>,
    shutdown: Arc<AtomicBool>,
    shutdown_notify: Arc<Notify>,
}

impl Connection {
    async fn run(
        self,
        mut ws_sink: WsSink,
        mut ws_source: WsSource,
        mut outgoing_rx: mpsc::Receiver<OutgoingFrame>,
    ) {
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                debug!("Shutdown signal received, closing connection");
                let _ = ws_sink.close().await;
                break;
            }

            let dropped = tokio::select! {
                _ = self.shutdown_notify.notified() => continue,
                msg = ws_source.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        self.dispatch(&text);
                        false
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                        false
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Host closed the bridge");
                        true
                    }
                    Some(Ok(_)) => false,
                    Some(Err(e)) => {
                        error!("Bridge socket error: {}", e);
                        true
                    }
                    None => {
                        info!("Bridge stream ended");
                        true
                    }
                },
                frame = outgoing_rx.recv() => match frame {
                    Some(frame) => {
                        if let Err(e) = ws_sink.send(Message::Text(frame.json)).await {
                            error!("Failed to send frame: {}", e);
                            self.fail_request(
                                &frame.request_id,
                                BridgeError::SendFailed {
                                    message: e.to_string(),
                                },
                            );
                        }
                        false
                    }
                    None => {
                        debug!("Bridge handle dropped, closing connection");
                        let _ = ws_sink.close().await;
                        break;
                    }
                },
            };

            if dropped {
                let _ = self.state_tx.send(BridgeState::Disconnected);
                self.fail_pending();
                match self.reconnect().await {
                    Some((sink, source)) => {
                        ws_sink = sink;
                        ws_source = source;
                        let _ = self.state_tx.send(BridgeState::Connected);
                    }
                    None => break,
                }
            }
        }

        info!("Bridge connection loop ended");
        self.fail_pending();
        let _ = self.state_tx.send(BridgeState::Disconnected);
    }

    fn dispatch(&self, text: &str) {
        match serde_json::from_str::<InboundFrame>(text) {
            Ok(InboundFrame::Event(event)) => {
                debug!("<- {:?}", event);
                self.events.publish(event);
            }
            Ok(InboundFrame::Reply(reply)) => {
                let waiter = self
                    .pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&reply.request_id);
                match waiter {
                    Some(tx) => {
                        let _ = tx.send(Ok(reply));
                    }
                    None => debug!("Reply for unknown request {}", reply.request_id),
                }
            }
            Err(e) => warn!("Skipping malformed frame: {} - {}", e, text),
        }
    }

    /// Resolve one waiting call with `error` instead of its reply.
    fn fail_request(&self, request_id: &str, error: BridgeError) {
        let waiter = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(request_id);
        if let Some(tx) = waiter {
            let _ = tx.send(Err(error));
        }
    }

    /// Resolve every waiting call as disconnected.
    fn fail_pending(&self) {
        let drained: Vec<ReplySender> = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, tx)| tx)
            .collect();
        if !drained.is_empty() {
            warn!("Failing {} pending bridge calls", drained.len());
        }
        for tx in drained {
            let _ = tx.send(Err(BridgeError::Disconnected));
        }
    }

    async fn reconnect(&self) -> Option<(WsSink, WsSource)> {
        for attempt in 1..=self.config.max_retries {
            if self.shutdown.load(Ordering::SeqCst) {
                return None;
            }

            let _ = self.state_tx.send(BridgeState::Reconnecting { attempt });
            let wait = backoff_secs(attempt, self.config.max_backoff_secs);
            info!(
                "Reconnection attempt {} of {}, waiting {}s",
                attempt, self.config.max_retries, wait
            );
            tokio::time::sleep(Duration::from_secs(wait)).await;

            if self.shutdown.load(Ordering::SeqCst) {
                return None;
            }

            match connect_async(self.config.url.as_str()).await {
                Ok((stream, _)) => {
                    info!("Reconnected on attempt {}", attempt);
                    return Some(stream.split());
                }
                Err(e) => warn!("Reconnection attempt {} failed: {}", attempt, e),
            }
        }

        error!(
            "Failed to reconnect after {} attempts, giving up",
            self.config.max_retries
        );
        None
    }
}
