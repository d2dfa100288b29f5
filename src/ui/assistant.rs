//! Assistant view: the revealed response, its links and the message field.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::helpers::{hint_line, row_count, truncate_string};
use super::layout::LayoutContext;
use super::theme::{COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_INPUT_BG, COLOR_LINK};
use crate::app::App;
use crate::markdown::LinkInfo;

/// Links beyond this many have no Alt+digit shortcut.
const MAX_LINK_SHORTCUTS: usize = 9;

pub fn render_assistant(frame: &mut Frame, area: Rect, app: &mut App, ctx: &LayoutContext) {
    let has_links = !app.response_links().is_empty();
    let [response_area, links_area, input_area, hints_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(if has_links { 1 } else { 0 }),
        Constraint::Length(3),
        Constraint::Length(if ctx.is_compact() { 0 } else { 1 }),
    ])
    .areas(area);

    render_response(frame, response_area, app);
    if has_links {
        frame.render_widget(Paragraph::new(links_line(app.response_links())), links_area);
    }
    render_input(frame, input_area, app);

    let hints = if ctx.is_narrow() {
        vec![("Enter", "Send"), ("Esc", "End")]
    } else {
        vec![
            ("Enter", "Send"),
            ("Alt+←/→", "Responses"),
            ("↑/↓", "Scroll"),
            ("Ctrl+S", "Save"),
            ("Esc", "End session"),
        ]
    };
    frame.render_widget(Paragraph::new(hint_line(&hints)), hints_area);
}

fn render_response(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut title = vec![Span::raw(" Response ")];
    if let Some(counter) = app.response_counter() {
        title.push(Span::styled(format!("{} ", counter), Style::default().fg(COLOR_DIM)));
    }
    if app.is_current_saved() {
        title.push(Span::styled("✓ saved ", Style::default().fg(COLOR_ACTIVE)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Line::from(title));
    let inner = block.inner(area);

    let lines = app.renderer.wrapped_lines(app.now_ms(), inner.width);
    let content_height = row_count(lines.len());
    app.scroll.update_limits(inner.height, content_height);

    let block = if app.scroll.max_offset() > 0 {
        let marker = match (app.scroll.is_at_top(), app.scroll.is_at_bottom()) {
            (true, _) => " ↓ ",
            (_, true) => " ↑ ",
            _ => " ↑↓ ",
        };
        block.title_bottom(Line::from(Span::styled(marker, Style::default().fg(COLOR_DIM))).right_aligned())
    } else {
        block
    };

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((app.scroll.offset(), 0)),
        area,
    );
}

/// `[1] text  [2] text`, numbered like their Alt+digit shortcuts.
fn links_line(links: &[LinkInfo]) -> Line<'static> {
    let mut spans = vec![Span::styled("Links: ", Style::default().fg(COLOR_DIM))];
    for (i, link) in links.iter().take(MAX_LINK_SHORTCUTS).enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[{}] ", i + 1),
            Style::default().fg(COLOR_DIM),
        ));
        spans.push(Span::styled(
            truncate_string(&link.text, 30),
            Style::default()
                .fg(COLOR_LINK)
                .add_modifier(Modifier::UNDERLINED),
        ));
    }
    Line::from(spans)
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let content = if app.message_input.is_empty() {
        Line::from(vec![
            Span::raw("▏"),
            Span::styled("Type a message to the AI...", Style::default().fg(COLOR_DIM)),
        ])
    } else {
        // Keep the tail of long input visible.
        let visible = area.width.saturating_sub(3) as usize;
        let count = app.message_input.chars().count();
        let tail: String = app
            .message_input
            .chars()
            .skip(count.saturating_sub(visible))
            .collect();
        Line::from(vec![Span::raw(tail), Span::raw("▏")])
    };
    frame.render_widget(
        Paragraph::new(content)
            .style(Style::default().bg(COLOR_INPUT_BG))
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{harness, Harness};
    use crate::bridge::HostEvent;
    use crate::ui::test_support::{draw, rows, screen_text};

    fn start(h: &mut Harness) {
        assert!(h.app.start_session());
    }

    fn finish_reveal(h: &mut Harness) {
        for task in h.clock.advance(60_000) {
            h.app.apply_reveal(task);
        }
    }

    #[tokio::test]
    async fn test_placeholder_before_first_response() {
        let mut h = harness();
        start(&mut h);
        let screen = screen_text(&draw(&mut h.app, 80, 20));
        assert!(screen.contains("Hey, Im listening to your Job Interview?"));
        assert!(screen.contains("Type a message to the AI..."));
    }

    #[tokio::test]
    async fn test_hidden_words_render_blank_then_appear() {
        let mut h = harness();
        start(&mut h);
        h.app.handle_host_event(HostEvent::Response {
            text: "alpha beta gamma".to_string(),
        });
        let screen = screen_text(&draw(&mut h.app, 80, 20));
        assert!(!screen.contains("beta"));

        finish_reveal(&mut h);
        let screen = screen_text(&draw(&mut h.app, 80, 20));
        assert!(screen.contains("alpha beta gamma"));
        assert!(screen.contains("1/1"));
    }

    #[tokio::test]
    async fn test_long_response_scrolls() {
        let mut h = harness();
        start(&mut h);
        let text: Vec<String> = (0..60).map(|i| format!("line{}\n", i)).collect();
        h.app.handle_host_event(HostEvent::Response {
            text: text.join("\n"),
        });
        finish_reveal(&mut h);
        let _ = draw(&mut h.app, 60, 20);
        assert!(h.app.scroll.max_offset() > 0);

        h.app.scroll_response_down();
        let buffer = draw(&mut h.app, 60, 20);
        assert!(!rows(&buffer).iter().any(|r| r.contains("line0 ")));
    }

    #[tokio::test]
    async fn test_links_are_numbered() {
        let links = vec![
            LinkInfo::new("https://a.example", "docs"),
            LinkInfo::new("https://b.example", "https://b.example"),
        ];
        let line = links_line(&links);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Links: [1] docs  [2] https://b.example");
    }

    #[tokio::test]
    async fn test_typed_message_is_shown() {
        let mut h = harness();
        start(&mut h);
        h.app.message_input = "what is rust".to_string();
        let screen = screen_text(&draw(&mut h.app, 80, 20));
        assert!(screen.contains("what is rust"));
    }
}
