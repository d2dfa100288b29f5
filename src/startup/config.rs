//! Startup configuration.
//!
//! Built from the environment first, then overridden by command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::bridge::DEFAULT_BRIDGE_URL;
use crate::cli::CliOverrides;
use crate::error::SystemError;
use crate::reveal::{RevealConfig, MAX_STAGGER_MS};

pub const ENV_HOST_URL: &str = "CUE_HOST_URL";
pub const ENV_DATA_DIR: &str = "CUE_DATA_DIR";
pub const ENV_LOG: &str = "CUE_LOG";
pub const ENV_REVEAL_STAGGER_MS: &str = "CUE_REVEAL_STAGGER_MS";

/// Log filter used when `CUE_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "cue=info";

/// Directory name under the home directory.
const DATA_DIR_NAME: &str = ".cue";

/// Configuration for starting the client.
///
/// # Example
///
/// ```ignore
/// use cue::startup::StartupConfig;
///
/// let config = StartupConfig::from_env()
///     .with_host_url("ws://127.0.0.1:9000/bridge");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// WebSocket URL of the host bridge
    pub host_url: String,
    /// Preferences, history and logs live here
    pub data_dir: PathBuf,
    /// `tracing` filter directive
    pub log_filter: String,
    pub reveal: RevealConfig,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            host_url: DEFAULT_BRIDGE_URL.to_string(),
            data_dir: default_data_dir(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            reveal: RevealConfig::default(),
        }
    }
}

/// `~/.cue`.
pub fn home_data_dir() -> Result<PathBuf, SystemError> {
    data_dir_under(dirs::home_dir())
}

fn data_dir_under(home: Option<PathBuf>) -> Result<PathBuf, SystemError> {
    home.map(|h| h.join(DATA_DIR_NAME))
        .ok_or(SystemError::NoHomeDirectory)
}

/// `~/.cue`, or `./.cue` when no home directory is known.
pub fn default_data_dir() -> PathBuf {
    home_data_dir().unwrap_or_else(|_| PathBuf::from(".").join(DATA_DIR_NAME))
}

impl StartupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host_url(mut self, url: impl Into<String>) -> Self {
        self.host_url = url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_reveal_stagger(mut self, stagger: Duration) -> Self {
        self.reveal.stagger = stagger;
        self
    }

    /// Read `CUE_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values are ignored, an
    /// unparsable stagger keeps the default and a huge one is capped.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(url) = get(ENV_HOST_URL) {
            config = config.with_host_url(url);
        }
        if let Some(dir) = get(ENV_DATA_DIR) {
            config = config.with_data_dir(dir);
        }
        if let Some(filter) = get(ENV_LOG) {
            config = config.with_log_filter(filter);
        }
        if let Some(ms) = get(ENV_REVEAL_STAGGER_MS).and_then(|v| v.trim().parse::<u64>().ok()) {
            config = config.with_reveal_stagger(Duration::from_millis(ms.min(MAX_STAGGER_MS)));
        }
        config
    }

    /// Apply command-line flags on top of the environment.
    pub fn with_overrides(mut self, overrides: &CliOverrides) -> Self {
        if let Some(url) = &overrides.host_url {
            self.host_url = url.clone();
        }
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        self
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("cue.log")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
