//! Mock implementations for testing.
//!
//! - [`MockHostBridge`] - event injection and call recording
//! - [`InMemoryStore`] - shared in-memory preference store
//! - [`InMemoryArchive`] - archived sessions held in memory
//! - [`ManualScheduler`] - reveal scheduler on a fake clock

pub mod archive;
pub mod bridge;
pub mod scheduler;
pub mod store;

pub use archive::InMemoryArchive;
pub use bridge::MockHostBridge;
pub use scheduler::ManualScheduler;
pub use store::InMemoryStore;
