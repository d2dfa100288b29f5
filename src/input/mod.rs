//! Input handling module for keyboard and command processing.
//!
//! All keyboard input is:
//!
//! 1. Translated to a [`Command`] by the [`CommandRegistry`] for the current view
//! 2. Executed by [`App::handle_command`](crate::app::App::handle_command)
//!
//! ```text
//! KeyEvent -> CommandRegistry::dispatch() -> Command -> App mutation
//! ```

pub mod command;
pub mod keybindings;
pub mod registry;

pub use command::Command;
pub use keybindings::{KeyCombo, KeybindingConfig};
pub use registry::CommandRegistry;
