//! Help view: keyboard shortcuts and external links.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::helpers::row_count;
use super::theme::{key_style, COLOR_DIM, COLOR_HEADER, COLOR_LINK};
use crate::app::{App, HELP_LINKS};

/// Shortcut reference grouped by where it applies.
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Everywhere",
        &[
            ("Ctrl+C", "Quit"),
            ("Ctrl+\\", "Show or hide the window"),
            ("Esc", "Close view, end session or quit"),
        ],
    ),
    (
        "Main and settings views",
        &[
            ("F1", "Help"),
            ("F2", "Customize"),
            ("F3", "History"),
            ("F4", "Advanced tools (advanced mode only)"),
            ("Ctrl+L", "Toggle compact layout"),
            ("Enter", "Start session"),
        ],
    ),
    (
        "Assistant",
        &[
            ("Enter", "Send message"),
            ("Alt+Left / Alt+Right", "Previous / next response"),
            ("Up / Down", "Scroll response"),
            ("Ctrl+S", "Save response"),
            ("Alt+1..9", "Open link from the response"),
        ],
    ),
];

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    ))
}

fn shortcut_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (section, keys) in SHORTCUTS {
        lines.push(section_title(section));
        for (key, action) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<22}", key), key_style()),
                Span::raw(action.to_string()),
            ]));
        }
        lines.push(Line::default());
    }
    lines
}

fn link_lines() -> Vec<Line<'static>> {
    let mut lines = vec![section_title("Links")];
    for (i, (label, url)) in HELP_LINKS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", i + 1), key_style()),
            Span::raw(format!("{}  ", label)),
            Span::styled(url.to_string(), Style::default().fg(COLOR_LINK)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "  Press the number to open a link in your browser.",
        Style::default().fg(COLOR_DIM),
    )));
    lines
}

pub fn render_help(frame: &mut Frame, area: Rect, _app: &App) {
    let links = link_lines();
    let [shortcuts_area, links_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(row_count(links.len())),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(shortcut_lines()).wrap(Wrap { trim: false }),
        shortcuts_area,
    );
    frame.render_widget(Paragraph::new(links), links_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::harness;
    use crate::input::Command;
    use crate::ui::test_support::{draw, screen_text};

    #[test]
    fn test_every_help_link_listed() {
        let lines = link_lines();
        assert_eq!(lines.len(), HELP_LINKS.len() + 2);
    }

    #[tokio::test]
    async fn test_help_view_lists_shortcuts_and_links() {
        let mut h = harness();
        h.app.handle_command(Command::OpenHelp);
        let screen = screen_text(&draw(&mut h.app, 100, 40));
        assert!(screen.contains("Ctrl+S"));
        assert!(screen.contains("Save response"));
        assert!(screen.contains("[1] Get an API key"));
    }
}
