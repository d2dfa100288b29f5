//! Per-entry animation bookkeeping and word fade styling.

use ratatui::style::{Color, Modifier, Style};

/// Reveal progress of the displayed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationState {
    /// Words already revealed for the displayed entry.
    pub revealed_word_count: usize,
    /// Whether newly added words fade in or appear at once.
    pub should_animate: bool,
}

/// Visibility of one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordVisibility {
    Hidden,
    /// Fading in since the given scheduler time.
    Fading { since_ms: u64 },
    Visible,
}

impl WordVisibility {
    /// Fade progress in `0.0..=1.0` at `now_ms`.
    pub fn progress(&self, now_ms: u64, fade_ms: u64) -> f32 {
        match self {
            WordVisibility::Hidden => 0.0,
            WordVisibility::Visible => 1.0,
            WordVisibility::Fading { since_ms } => {
                if fade_ms == 0 {
                    return 1.0;
                }
                let elapsed = now_ms.saturating_sub(*since_ms) as f32;
                (elapsed / fade_ms as f32).min(1.0)
            }
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, WordVisibility::Hidden)
    }
}

/// Style of a word part way through its fade.
///
/// The terminal has no opacity, so the fade steps dim gray, gray, then the
/// word's own style.
pub fn fade_style(base: Style, progress: f32) -> Style {
    if progress >= 1.0 {
        base
    } else if progress < 1.0 / 3.0 {
        base.fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else if progress < 2.0 / 3.0 {
        base.fg(Color::DarkGray)
    } else {
        base.fg(Color::Gray)
    }
}
