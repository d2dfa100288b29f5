//! Layout for every view: a one-row header, the view body and a one-row
//! status bar.
//!
//! Normal layout pads the body by one cell on each side; compact layout
//! drops the padding so more of a small overlay window is usable.

use ratatui::layout::{Constraint, Layout, Rect};

use crate::models::LayoutMode;

/// Terminal width below which hints are shortened
pub const NARROW_WIDTH: u16 = 60;

/// Layout context holding terminal dimensions and the chosen layout mode.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
    pub mode: LayoutMode,
}

/// Areas of a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAreas {
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16, mode: LayoutMode) -> Self {
        Self {
            width,
            height,
            mode,
        }
    }

    pub fn is_compact(&self) -> bool {
        self.mode == LayoutMode::Compact
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_WIDTH
    }

    /// Padding around the body in cells.
    pub fn padding(&self) -> u16 {
        if self.is_compact() {
            0
        } else {
            1
        }
    }

    /// Split the frame into header, body and status rows.
    pub fn split(&self, area: Rect) -> FrameAreas {
        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        FrameAreas {
            header,
            body: pad(body, self.padding()),
            status,
        }
    }
}

/// Shrink an area by `margin` cells on every side.
pub fn pad(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin.min(area.width / 2),
        y: area.y + margin.min(area.height / 2),
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

/// A centered box no wider than `max_width`.
pub fn centered(area: Rect, max_width: u16, height: u16) -> Rect {
    let width = area.width.min(max_width);
    let height = area.height.min(height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
