//! Host bridge wire protocol.
//!
//! The host process pushes [`HostEvent`]s and answers [`HostRequest`]s with
//! a [`HostReply`] carrying the same request id. Frames are JSON text.

pub mod hub;
pub mod messages;

pub use hub::EventHub;
pub use messages::{HostEvent, HostReply, HostRequest, InboundFrame, RequestEnvelope, SendResult};

/// Default endpoint of the host bridge.
pub const DEFAULT_BRIDGE_URL: &str = "ws://127.0.0.1:7420/bridge";

/// Default time to wait for a reply before failing a call.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 10;
