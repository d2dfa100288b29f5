//! CLI module for cue.
//!
//! Flags are handled in `main()` before the TUI starts:
//!
//! ```ignore
//! use cue::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Version => println!("{}", cue::cli::version_string()),
//!     CliCommand::RunTui(overrides) => { /* start the TUI */ }
//!     _ => {}
//! }
//! ```

pub mod args;

pub use args::{parse_args, CliCommand, CliOverrides};

/// Current version of cue (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_string() -> String {
    format!("cue {}", VERSION)
}

/// Usage text for `--help`.
pub fn usage() -> String {
    format!(
        "{}\n\n\
         Usage: cue [OPTIONS]\n\n\
         Options:\n  \
         --host <URL>       Host bridge WebSocket URL (env CUE_HOST_URL)\n  \
         --data-dir <PATH>  Preference, history and log directory (env CUE_DATA_DIR)\n  \
         -V, --version      Print version\n  \
         -h, --help         Print this help\n\n\
         Environment:\n  \
         CUE_LOG                 Log filter (default cue=info)\n  \
         CUE_REVEAL_STAGGER_MS   Delay between revealed words",
        version_string()
    )
}
