//! Customize and advanced forms.
//!
//! Each row shows a label, the current value between `‹ ›` markers and, for
//! the focused row, the field description underneath.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::helpers::hint_line;
use super::theme::{focused_style, COLOR_DIM, COLOR_ERROR, COLOR_MUTED};
use crate::app::{AdvancedField, App, CustomizeField};
use crate::models::SettingOption;

const LABEL_WIDTH: usize = 26;

/// Displayed value of a customize row.
fn customize_value(app: &App, field: CustomizeField) -> String {
    let prefs = &app.preferences;
    match field {
        CustomizeField::Profile => prefs.profile().label().to_string(),
        CustomizeField::Language => prefs.language().label().to_string(),
        CustomizeField::ScreenshotInterval => prefs.screenshot_interval().label().to_string(),
        CustomizeField::ImageQuality => prefs.image_quality().label().to_string(),
        CustomizeField::LayoutMode => prefs.layout_mode().label().to_string(),
        CustomizeField::AdvancedMode => on_off(prefs.advanced_mode()),
    }
}

/// Displayed value of an advanced row.
fn advanced_value(app: &App, field: AdvancedField) -> String {
    let prefs = &app.preferences;
    match field {
        AdvancedField::ContentProtection => on_off(prefs.content_protection()),
        AdvancedField::StealthLevel => prefs.stealth_level().label().to_string(),
        AdvancedField::AudioMode => prefs.audio_mode().label().to_string(),
        AdvancedField::ThrottleTokens => on_off(prefs.throttle_tokens()),
        AdvancedField::MaxTokensPerMin => group_thousands(prefs.max_tokens_per_min()),
        AdvancedField::ThrottleAtPercent => format!("{}%", prefs.throttle_at_percent()),
        AdvancedField::FontSize => format!("{}px", prefs.font_size()),
        AdvancedField::ClearData => {
            if app.confirm_clear {
                "Press Enter again to confirm".to_string()
            } else {
                "Press Enter".to_string()
            }
        }
    }
}

fn on_off(enabled: bool) -> String {
    let label = if enabled { "On" } else { "Off" };
    label.to_string()
}

/// 1000000 -> "1,000,000"
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn form_row(label: &str, value: String, description: &str, focused: bool, danger: bool) -> Vec<Line<'static>> {
    let marker = if focused { "▶ " } else { "  " };
    let label_style = if focused {
        focused_style()
    } else {
        Style::default().fg(COLOR_MUTED)
    };
    let value_style = if danger {
        Style::default().fg(COLOR_ERROR)
    } else if focused {
        focused_style()
    } else {
        Style::default()
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(marker.to_string(), label_style),
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
        Span::styled(format!("‹ {} ›", value), value_style),
    ])];
    if focused {
        lines.push(Line::from(Span::styled(
            format!("    {}", description),
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

fn render_form(frame: &mut Frame, area: Rect, rows: Vec<Line<'static>>, footer: Line<'static>) {
    let [body, hints] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    frame.render_widget(Paragraph::new(rows).wrap(Wrap { trim: false }), body);
    frame.render_widget(Paragraph::new(footer), hints);
}

pub fn render_customize(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.customize_field();
    let rows: Vec<Line<'static>> = CustomizeField::ALL
        .iter()
        .flat_map(|field| {
            form_row(
                field.label(),
                customize_value(app, *field),
                field.description(),
                *field == focused,
                false,
            )
        })
        .collect();
    let footer = hint_line(&[("↑/↓", "Select"), ("←/→", "Change"), ("Esc", "Back")]);
    render_form(frame, area, rows, footer);
}

pub fn render_advanced(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.advanced_field();
    let rows: Vec<Line<'static>> = app
        .advanced_fields()
        .into_iter()
        .flat_map(|field| {
            let danger = field == AdvancedField::ClearData && app.confirm_clear;
            form_row(
                field.label(),
                advanced_value(app, field),
                field.description(),
                field == focused,
                danger,
            )
        })
        .collect();
    let footer = hint_line(&[
        ("↑/↓", "Select"),
        ("←/→", "Change"),
        ("Enter", "Toggle"),
        ("Esc", "Back"),
    ]);
    render_form(frame, area, rows, footer);
}
