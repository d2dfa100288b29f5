//! Startup: configuration and logging set up before the TUI takes the
//! terminal.
//!
//! - [`config`] - [`StartupConfig`] from the environment and CLI flags
//! - [`logging`] - file-backed `tracing` subscriber

pub mod config;
pub mod logging;

pub use config::{default_data_dir, home_data_dir, StartupConfig, DEFAULT_LOG_FILTER};
pub use logging::init_tracing;
