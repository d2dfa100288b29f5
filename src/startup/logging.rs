//! Tracing initialisation.
//!
//! The terminal belongs to the UI, so log output goes to a file in the
//! data directory.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::StartupConfig;
use crate::error::SystemError;

/// Install the global subscriber writing to [`StartupConfig::log_path`].
///
/// An invalid filter falls back to the default. Errors are returned so the
/// caller can carry on without logging.
pub fn init_tracing(config: &StartupConfig) -> Result<(), SystemError> {
    fs::create_dir_all(&config.data_dir).map_err(|e| SystemError::DirectoryCreationFailed {
        path: config.data_dir.clone(),
        message: e.to_string(),
    })?;
    let path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| SystemError::IoError {
            operation: "open log file".to_string(),
            path: Some(path.clone()),
            message: e.to_string(),
        })?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(super::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .map_err(|e| SystemError::IoError {
            operation: "install tracing subscriber".to_string(),
            path: None,
            message: e.to_string(),
        })
}
