//! Scroll state of the response container.
//!
//! Offsets count lines from the top of the rendered content. The limits are
//! refreshed on every draw from the wrapped row count, so replacing the
//! content of the same entry never moves the viewport by itself.

/// Fraction of the viewport moved by one relative scroll step, in percent.
pub const SCROLL_STEP_PERCENT: u16 = 30;

/// Scroll position and limits for the response container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: u16,
    viewport_height: u16,
    content_height: u16,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset from the top.
    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn content_height(&self) -> u16 {
        self.content_height
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Lines moved by one relative step: 30% of the viewport, at least one.
    pub fn step(&self) -> u16 {
        (self.viewport_height.saturating_mul(SCROLL_STEP_PERCENT) / 100).max(1)
    }

    /// Record the latest layout and clamp the offset into it.
    pub fn update_limits(&mut self, viewport_height: u16, content_height: u16) {
        self.viewport_height = viewport_height;
        self.content_height = content_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll up by one step. Returns true if the offset changed.
    pub fn scroll_up(&mut self) -> bool {
        let old = self.offset;
        self.offset = self.offset.saturating_sub(self.step());
        old != self.offset
    }

    /// Scroll down by one step. Returns true if the offset changed.
    pub fn scroll_down(&mut self) -> bool {
        let old = self.offset;
        self.offset = self.offset.saturating_add(self.step()).min(self.max_offset());
        old != self.offset
    }

    pub fn is_at_top(&self) -> bool {
        self.offset == 0
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Back to the top, used when a different entry is displayed.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(viewport: u16, content: u16) -> ScrollState {
        let mut s = ScrollState::new();
        s.update_limits(viewport, content);
        s
    }

    #[test]
    fn test_step_is_thirty_percent_of_viewport() {
        assert_eq!(state(20, 100).step(), 6);
        assert_eq!(state(10, 100).step(), 3);
    }

    #[test]
    fn test_step_is_at_least_one_line() {
        assert_eq!(state(2, 100).step(), 1);
        assert_eq!(state(0, 100).step(), 1);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut s = state(10, 15);
        assert!(s.scroll_down());
        assert!(s.scroll_down());
        assert_eq!(s.offset(), 5);
        assert!(!s.scroll_down());
        assert!(s.is_at_bottom());
    }

    #[test]
    fn test_scroll_up_stops_at_top() {
        let mut s = state(10, 40);
        s.scroll_down();
        assert!(s.scroll_up());
        assert!(s.is_at_top());
        assert!(!s.scroll_up());
    }

    #[test]
    fn test_content_shorter_than_viewport_never_scrolls() {
        let mut s = state(20, 5);
        assert!(!s.scroll_down());
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn test_growing_content_keeps_offset() {
        let mut s = state(10, 30);
        s.scroll_down();
        s.scroll_down();
        let before = s.offset();
        s.update_limits(10, 45);
        assert_eq!(s.offset(), before);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut s = state(10, 50);
        for _ in 0..20 {
            s.scroll_down();
        }
        s.update_limits(10, 12);
        assert_eq!(s.offset(), 2);
    }
}
