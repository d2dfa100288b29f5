//! Trait abstractions for dependency injection and testability.
//!
//! - [`HostBridge`] - calls and events exchanged with the host process
//! - [`ArchiveStore`] - archived conversation sessions
//! - [`RevealScheduler`] - delayed delivery of reveal animation steps
//!
//! The preference [`KeyValueStore`](crate::preferences::KeyValueStore)
//! lives next to its typed wrapper.

pub mod archive;
pub mod bridge;
pub mod scheduler;

pub use archive::{ArchiveError, ArchiveStore};
pub use bridge::{BridgeState, HostBridge};
pub use scheduler::RevealScheduler;
