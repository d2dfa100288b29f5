//! Concrete implementations of trait abstractions.
//!
//! - [`WsHostBridge`] - host bridge over a JSON WebSocket
//! - [`FileArchiveStore`] - archived sessions from the data directory
//! - [`TokioRevealScheduler`] - reveal timers on the tokio runtime
//!
//! The [`mock`] submodule provides test doubles for each of them.

pub mod file_archive;
pub mod mock;
pub mod tokio_scheduler;
pub mod ws_bridge;

pub use file_archive::FileArchiveStore;
pub use mock::{InMemoryArchive, InMemoryStore, ManualScheduler, MockHostBridge};
pub use tokio_scheduler::TokioRevealScheduler;
pub use ws_bridge::{WsBridgeConfig, WsHostBridge};
