//! UI rendering for cue
//!
//! Every view shares the same chrome: a header row with the view title and
//! the header shortcuts, the view body, and a status bar showing the latest
//! host status (or a short-lived notice) plus the bridge connection state.
//!
//! `render` takes `&mut App` because the assistant view feeds the measured
//! viewport back into the response scroll limits.

mod assistant;
mod help;
mod helpers;
mod history;
mod layout;
mod main_view;
mod onboarding;
mod settings;
mod theme;

pub use helpers::{format_elapsed, mask_secret, truncate_string};
pub use layout::{FrameAreas, LayoutContext};
pub use theme::{COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};
use crate::traits::BridgeState;
use theme::{COLOR_MUTED, COLOR_WARNING};

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the UI for the current view.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let ctx = LayoutContext::new(area.width, area.height, app.preferences.layout_mode());
    let areas = ctx.split(area);

    render_header(frame, areas.header, app, &ctx);

    match app.view {
        View::Onboarding => onboarding::render_onboarding(frame, areas.body, app, &ctx),
        View::Main => main_view::render_main(frame, areas.body, app, &ctx),
        View::Assistant => assistant::render_assistant(frame, areas.body, app, &ctx),
        View::Customize => settings::render_customize(frame, areas.body, app),
        View::Advanced => settings::render_advanced(frame, areas.body, app),
        View::Help => help::render_help(frame, areas.body, app),
        View::History => history::render_history(frame, areas.body, app),
    }

    render_status_bar(frame, areas.status, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let title = Line::from(vec![
        Span::styled(
            " cue ",
            Style::default()
                .fg(theme::COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("· {}", app.view.title()), Style::default().fg(COLOR_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    let right = if app.view == View::Assistant {
        session_indicator(app)
    } else if app.view == View::Main || app.view.is_secondary() {
        header_hints(app, ctx)
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
}

/// Live dot, session clock and click-through marker.
fn session_indicator(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    if app.click_through {
        spans.push(Span::styled("click-through  ", Style::default().fg(COLOR_WARNING)));
    }
    if app.session_initializing {
        spans.push(Span::styled("connecting ", Style::default().fg(COLOR_MUTED)));
    } else if let Some(started) = app.session_started_at {
        spans.push(Span::styled("● ", Style::default().fg(COLOR_ACTIVE)));
        spans.push(Span::raw(format_elapsed(Instant::now().duration_since(started))));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

fn header_hints(app: &App, ctx: &LayoutContext) -> Line<'static> {
    let mut hints = vec![("F1", "Help"), ("F2", "Customize"), ("F3", "History")];
    if app.preferences.advanced_mode() {
        hints.push(("F4", "Advanced"));
    }
    if ctx.is_narrow() {
        hints.truncate(1);
    }
    let mut line = helpers::hint_line(&hints);
    line.spans.push(Span::raw(" "));
    line
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match &app.notice {
        Some(notice) => (notice.message.clone(), Style::default().fg(COLOR_ACCENT)),
        None => {
            let style = if app.status_text.starts_with("Error") {
                Style::default().fg(COLOR_ERROR)
            } else {
                Style::default().fg(COLOR_MUTED)
            };
            (app.status_text.clone(), style)
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", text), style))),
        area,
    );

    let (label, color) = match app.bridge_state {
        BridgeState::Connected => ("● connected".to_string(), COLOR_ACTIVE),
        BridgeState::Reconnecting { attempt } => {
            (format!("◌ reconnecting ({})", attempt), COLOR_WARNING)
        }
        BridgeState::Disconnected => ("○ offline".to_string(), COLOR_ERROR),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("{} ", label), Style::default().fg(color))))
            .alignment(Alignment::Right),
        area,
    );
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use crate::app::test_support::harness;
    use crate::app::View;
    use crate::bridge::HostEvent;
    use crate::traits::BridgeState;

    #[tokio::test]
    async fn test_header_shows_view_title_and_hints() {
        let mut h = harness();
        let buffer = draw(&mut h.app, 100, 20);
        let rows = rows(&buffer);
        assert!(rows[0].contains("cue"));
        assert!(rows[0].contains("[F1] Help"));
        assert!(!rows[0].contains("Advanced"));
    }

    #[tokio::test]
    async fn test_advanced_hint_only_in_advanced_mode() {
        let mut h = harness();
        h.app
            .preferences
            .set_advanced_mode(true)
            .expect("store advanced mode");
        let buffer = draw(&mut h.app, 100, 20);
        assert!(rows(&buffer)[0].contains("[F4] Advanced"));
    }

    #[tokio::test]
    async fn test_status_bar_shows_status_and_bridge_state() {
        let mut h = harness();
        h.app.handle_host_event(HostEvent::Status {
            text: "Listening...".to_string(),
        });
        h.app.bridge_state = BridgeState::Reconnecting { attempt: 2 };
        let buffer = draw(&mut h.app, 80, 20);
        let last = rows(&buffer).pop().expect("status row");
        assert!(last.contains("Listening..."));
        assert!(last.contains("reconnecting (2)"));
    }

    #[tokio::test]
    async fn test_notice_replaces_status() {
        let mut h = harness();
        h.app.status_text = "Ready".to_string();
        h.app.show_notice("Response saved");
        let buffer = draw(&mut h.app, 80, 20);
        let last = rows(&buffer).pop().expect("status row");
        assert!(last.contains("Response saved"));
        assert!(!last.contains("Ready"));
    }

    #[tokio::test]
    async fn test_every_view_renders_on_a_tiny_terminal() {
        let mut h = harness();
        for view in [
            View::Onboarding,
            View::Main,
            View::Customize,
            View::Help,
            View::History,
            View::Advanced,
            View::Assistant,
        ] {
            h.app.view = view;
            let _ = draw(&mut h.app, 20, 5);
            let _ = draw(&mut h.app, 1, 1);
        }
    }
}
