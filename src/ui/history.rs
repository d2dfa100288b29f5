//! History view: archived sessions, one session's turns, saved responses.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::helpers::{hint_line, row_count, truncate_string};
use super::theme::{focused_style, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_MUTED};
use crate::app::App;
use crate::models::{profile_label, ConversationSession, SavedResponse};

/// Local date and time for list rows.
fn format_timestamp(session: &ConversationSession) -> String {
    session
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn session_row(session: &ConversationSession, selected: bool, width: usize) -> Line<'static> {
    let style = if selected {
        focused_style()
    } else {
        Style::default()
    };
    let marker = if selected { "▶ " } else { "  " };
    let head = format!(
        "{}{}  {}  ",
        marker,
        format_timestamp(session),
        profile_label(&session.profile)
    );
    let remaining = width.saturating_sub(head.chars().count());
    Line::from(vec![
        Span::styled(head, style),
        Span::styled(session.preview(remaining.max(8)), Style::default().fg(COLOR_MUTED)),
    ])
}

fn detail_lines(session: &ConversationSession) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{} · {}",
                format_timestamp(session),
                profile_label(&session.profile)
            ),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    if session.conversation_history.is_empty() {
        lines.push(Line::from(Span::styled("No content", Style::default().fg(COLOR_DIM))));
    }
    for turn in &session.conversation_history {
        lines.push(Line::from(Span::styled(
            format!("{}:", turn.speaker()),
            Style::default().fg(COLOR_MUTED).add_modifier(Modifier::BOLD),
        )));
        for text in turn.display_text().lines() {
            lines.push(Line::from(text.to_string()));
        }
        lines.push(Line::default());
    }
    lines
}

fn saved_lines(saved: &[SavedResponse], width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("Saved responses ({})", saved.len()),
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    ))];
    for item in saved.iter().rev() {
        let head = format!(
            "  {}  {}  ",
            item.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            profile_label(&item.profile)
        );
        let remaining = width.saturating_sub(head.chars().count()).max(8);
        let preview = item.response.replace('\n', " ");
        lines.push(Line::from(vec![
            Span::raw(head),
            Span::styled(truncate_string(&preview, remaining), Style::default().fg(COLOR_MUTED)),
        ]));
    }
    lines
}

pub fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let [main_area, hints_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let history = &app.history;
    if history.detail_open {
        if let Some(session) = history.selected_session() {
            frame.render_widget(
                Paragraph::new(detail_lines(session))
                    .wrap(Wrap { trim: false })
                    .scroll((history.detail_scroll, 0)),
                main_area,
            );
        }
        frame.render_widget(
            Paragraph::new(hint_line(&[("↑/↓", "Scroll"), ("Esc", "Back to list")])),
            hints_area,
        );
        return;
    }

    let saved = app.preferences.saved_responses();
    let saved_height = if saved.is_empty() {
        0
    } else {
        row_count(saved.len())
            .saturating_add(2)
            .min(main_area.height / 2)
    };
    let [list_area, saved_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(saved_height),
    ])
    .areas(main_area);
    let width = list_area.width as usize;

    let list: Vec<Line<'static>> = if let Some(error) = &history.error {
        vec![Line::from(Span::styled(error.clone(), Style::default().fg(COLOR_ERROR)))]
    } else if history.sessions.is_empty() {
        vec![Line::from(Span::styled(
            "No conversations yet. Start a session to see it here.",
            Style::default().fg(COLOR_DIM),
        ))]
    } else {
        // Keep the selection on screen.
        let visible = list_area.height.max(1) as usize;
        let first = history.selected.saturating_sub(visible - 1);
        history
            .sessions
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, s)| session_row(s, i == history.selected, width))
            .collect()
    };
    frame.render_widget(Paragraph::new(list), list_area);

    if !saved.is_empty() {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(COLOR_BORDER));
        frame.render_widget(
            Paragraph::new(saved_lines(&saved, width)).block(block),
            saved_area,
        );
    }

    frame.render_widget(
        Paragraph::new(hint_line(&[("↑/↓", "Select"), ("Enter", "Open"), ("Esc", "Back")])),
        hints_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryArchive, InMemoryStore};
    use crate::app::test_support::harness_with;
    use crate::input::Command;
    use crate::models::{ConversationTurn, Profile};
    use crate::ui::test_support::{draw, screen_text};
    use chrono::{TimeZone, Utc};

    fn session(id: &str, profile: &str, turns: Vec<ConversationTurn>) -> ConversationSession {
        ConversationSession {
            session_id: id.to_string(),
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).single().expect("valid"),
            profile: profile.to_string(),
            conversation_history: turns,
        }
    }

    fn onboarded_store() -> InMemoryStore {
        InMemoryStore::with_values([("onboardingCompleted", "true")])
    }

    #[tokio::test]
    async fn test_list_then_detail() {
        let archive = InMemoryArchive::with_sessions(vec![session(
            "a",
            "custom-profile",
            vec![
                ConversationTurn::user("what is ownership"),
                ConversationTurn::model("a set of rules"),
            ],
        )]);
        let mut h = harness_with(onboarded_store(), archive);
        h.app.handle_command(Command::OpenHistory);
        let screen = screen_text(&draw(&mut h.app, 100, 24));
        assert!(screen.contains("custom-profile"));
        assert!(screen.contains("what is ownership"));

        h.app.handle_command(Command::Activate);
        let screen = screen_text(&draw(&mut h.app, 100, 24));
        assert!(screen.contains("You:"));
        assert!(screen.contains("AI Assistant:"));
        assert!(screen.contains("a set of rules"));
    }

    #[tokio::test]
    async fn test_empty_session_shows_no_content() {
        let lines = detail_lines(&session("b", "meeting", vec![]));
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l == "No content"));
        assert!(text[0].contains("Business Meeting"));
    }

    #[tokio::test]
    async fn test_saved_responses_listed() {
        let mut h = harness_with(onboarded_store(), InMemoryArchive::new());
        h.app
            .preferences
            .save_response("remember this answer", Profile::Sales)
            .expect("save");
        h.app.handle_command(Command::OpenHistory);
        let screen = screen_text(&draw(&mut h.app, 100, 24));
        assert!(screen.contains("Saved responses (1)"));
        assert!(screen.contains("remember this answer"));
        assert!(screen.contains("No conversations yet"));
    }

    #[tokio::test]
    async fn test_many_saved_responses_take_at_most_half_the_height() {
        let mut h = harness_with(onboarded_store(), InMemoryArchive::new());
        for i in 0..40 {
            h.app
                .preferences
                .save_response(&format!("answer {}", i), Profile::Exam)
                .expect("save");
        }
        h.app.handle_command(Command::OpenHistory);
        let screen = screen_text(&draw(&mut h.app, 80, 20));
        assert!(screen.contains("Saved responses (40)"));
        assert!(screen.contains("No conversations yet"));
    }
}
