//! Main view: API key entry and session start.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::helpers::{hint_line, mask_secret};
use super::layout::{centered, LayoutContext};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_INPUT_BG};
use crate::app::App;
use crate::models::SettingOption;

pub fn render_main(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let panel = centered(area, 70, 12);
    let [heading, _, input, error, _, details, hints] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .areas(panel);

    let heading_text = vec![
        Line::from(Span::styled(
            "Welcome to Cue",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Enter your Gemini API key to begin",
            Style::default().fg(COLOR_DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(heading_text), heading);

    let border_color = if app.api_key_error.is_some() {
        COLOR_ERROR
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(" API key ");
    let field = if app.api_key_input.is_empty() {
        Span::styled("Paste or type your key", Style::default().fg(COLOR_DIM))
    } else {
        Span::styled(mask_secret(&app.api_key_input), Style::default().fg(COLOR_ACCENT))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![field, Span::raw("▏")]))
            .style(Style::default().bg(COLOR_INPUT_BG))
            .block(block),
        input,
    );

    if let Some(err) = &app.api_key_error {
        frame.render_widget(
            Paragraph::new(Span::styled(err.message.clone(), Style::default().fg(COLOR_ERROR))),
            error,
        );
    }

    let prefs = &app.preferences;
    let summary = vec![
        Line::from(vec![
            Span::styled("Profile: ", Style::default().fg(COLOR_DIM)),
            Span::raw(prefs.profile().label()),
            Span::styled("   Language: ", Style::default().fg(COLOR_DIM)),
            Span::raw(prefs.language().label()),
        ]),
        Line::from(vec![
            Span::styled("Capture: ", Style::default().fg(COLOR_DIM)),
            Span::raw(prefs.screenshot_interval().label()),
            Span::styled("   Layout: ", Style::default().fg(COLOR_DIM)),
            Span::raw(prefs.layout_mode().label()),
        ]),
    ];
    frame.render_widget(Paragraph::new(summary).wrap(Wrap { trim: true }), details);

    let start_label = if app.session_initializing {
        "Connecting..."
    } else {
        "Start Session"
    };
    let mut keys = vec![("Enter", start_label), ("Ctrl+G", "Get API key")];
    if !ctx.is_narrow() {
        keys.push(("Ctrl+L", "Layout"));
        keys.push(("Esc", "Quit"));
    }
    frame.render_widget(Paragraph::new(hint_line(&keys)).wrap(Wrap { trim: true }), hints);
}
