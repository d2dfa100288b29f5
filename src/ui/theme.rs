//! Color theme constants for the cue UI
//!
//! A minimal dark palette. Response text uses the terminal's default
//! foreground so the reveal fade (dim, gray, full) reads on any background.

use ratatui::style::{Color, Modifier, Style};

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for highlights and the focused row
pub const COLOR_ACCENT: Color = Color::White;

/// Header title color
pub const COLOR_HEADER: Color = Color::White;

/// Live session indicators
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Secondary labels and descriptions
pub const COLOR_MUTED: Color = Color::Gray;

/// Validation errors and failed status lines
pub const COLOR_ERROR: Color = Color::Red;

/// Warnings such as a reconnecting bridge
pub const COLOR_WARNING: Color = Color::Yellow;

/// Link markers in the response footer
pub const COLOR_LINK: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Background for text input rows
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);

/// Style for a focused form row.
pub fn focused_style() -> Style {
    Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Style for keyboard hints like `[F1]`.
pub fn key_style() -> Style {
    Style::default().fg(COLOR_MUTED).add_modifier(Modifier::BOLD)
}
