//! Helper functions for UI rendering

use std::time::Duration;

use ratatui::text::{Line, Span};

use super::theme::{key_style, COLOR_DIM};

/// Truncate a string to `max_chars`, adding "..." when cut.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        s.chars().take(max_chars).collect()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}

/// Session clock as `mm:ss`, or `h:mm:ss` past an hour.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

/// Terminal rows for `count` items, saturating at the largest height.
pub fn row_count(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// A row of `[key] label` hints.
pub fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("[{}]", key), key_style()));
        spans.push(Span::styled(format!(" {}", label), ratatui::style::Style::default().fg(COLOR_DIM)));
    }
    Line::from(spans)
}

/// Masked form of a secret, keeping the last four characters visible.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer sentence", 8), "a lon...");
        assert_eq!(truncate_string("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(75)), "01:15");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1:02:05");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("key-123456"), "******3456");
    }

    #[test]
    fn test_row_count_saturates() {
        assert_eq!(row_count(0), 0);
        assert_eq!(row_count(12), 12);
        assert_eq!(row_count(70_000), u16::MAX);
        assert_eq!(row_count(70_000).saturating_add(2), u16::MAX);
    }

    #[test]
    fn test_hint_line_text() {
        let line = hint_line(&[("F1", "Help"), ("Esc", "Quit")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[F1] Help  [Esc] Quit");
    }
}
