//! Domain objects shared by the controller and the views.

pub mod scroll;

pub use scroll::{ScrollState, SCROLL_STEP_PERCENT};
