//! cue - a terminal client for a screen-aware AI assistant host
//!
//! The host process captures the screen and talks to the model; this crate
//! shows its streamed responses with a word-by-word reveal, and drives the
//! session, settings and history views.
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod app;
pub mod bridge;
pub mod cli;
pub mod domain;
pub mod error;
pub mod input;
pub mod markdown;
pub mod models;
pub mod preferences;
pub mod reveal;
pub mod startup;
pub mod stream;
pub mod traits;
pub mod ui;
