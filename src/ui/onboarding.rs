//! Four-step onboarding wizard.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::helpers::hint_line;
use super::layout::{centered, LayoutContext};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};
use crate::app::{App, OnboardingStep};

/// Step dots such as `● ○ ○ ○`.
fn progress_line(step: OnboardingStep) -> Line<'static> {
    let spans: Vec<Span<'static>> = OnboardingStep::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, s)| {
            let (dot, color) = if *s == step {
                ("●", COLOR_ACCENT)
            } else {
                ("○", COLOR_DIM)
            };
            let sep = if i == 0 { "" } else { " " };
            [Span::raw(sep), Span::styled(dot, Style::default().fg(color))]
        })
        .collect();
    Line::from(spans)
}

pub fn render_onboarding(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let step = app.onboarding_step;
    let box_area = centered(area, 72, 16);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut lines = vec![
        Line::from(Span::styled(
            step.title(),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(step.body().iter().map(|text| Line::from(*text)));
    lines.push(Line::default());
    lines.push(progress_line(step));

    let next_label = if step.is_last() { "Get Started" } else { "Next" };
    let mut hints = vec![("Enter", next_label)];
    if step.prev().is_some() {
        hints.push(("Left", "Back"));
    }
    hints.push(("S", "Skip"));
    if !ctx.is_narrow() {
        hints.push(("Esc", "Quit"));
    }
    lines.push(Line::default());
    lines.push(hint_line(&hints));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryArchive, InMemoryStore};
    use crate::app::test_support::harness_with;
    use crate::app::View;
    use crate::ui::test_support::{draw, screen_text};

    #[test]
    fn test_progress_marks_current_step() {
        let line = progress_line(OnboardingStep::Privacy);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "○ ○ ● ○");
    }

    #[tokio::test]
    async fn test_first_step_has_no_back_hint() {
        let mut h = harness_with(InMemoryStore::new(), InMemoryArchive::new());
        assert_eq!(h.app.view, View::Onboarding);
        let screen = screen_text(&draw(&mut h.app, 90, 24));
        assert!(screen.contains("Welcome"));
        assert!(screen.contains("[Enter] Next"));
        assert!(!screen.contains("[Left] Back"));
    }

    #[tokio::test]
    async fn test_last_step_offers_get_started() {
        let mut h = harness_with(InMemoryStore::new(), InMemoryArchive::new());
        h.app.onboarding_step = OnboardingStep::GetStarted;
        let screen = screen_text(&draw(&mut h.app, 90, 24));
        assert!(screen.contains("[Enter] Get Started"));
        assert!(screen.contains("[Left] Back"));
    }
}
