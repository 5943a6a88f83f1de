//! Assessment wizard: stepper and the fields of the current step.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{fields_for_step, AssessmentForm, FieldKind, FieldSpec, Step};
use crate::ports::Panel;
use crate::tui::styles::HeartTheme;
use crate::tui::surface::TuiSurface;

use super::{render_key_hints, results::render_results};

/// Render the assessment view: the wizard, or the results dashboard once a
/// prediction has been shown.
pub fn render_assessment(f: &mut Frame, area: Rect, surface: &TuiSurface, form: &AssessmentForm) {
    if surface.is_visible(Panel::Results) {
        render_results(f, area, surface);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stepper
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    if surface.is_visible(Panel::Stepper) {
        render_stepper(f, chunks[0], surface);
    }
    if surface.is_visible(Panel::AssessmentForm) {
        render_step_fields(f, chunks[1], surface, form);
    }
    render_form_footer(f, chunks[2], surface);
}

fn render_stepper(f: &mut Frame, area: Rect, surface: &TuiSurface) {
    let mut spans = vec![Span::raw(" ")];
    for (i, (step, indicator)) in Step::ALL
        .iter()
        .zip(surface.indicators().iter())
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::styled("  ──  ", HeartTheme::text_muted()));
        }
        let style = HeartTheme::step_indicator(*indicator);
        spans.push(Span::styled(format!("({}) ", step.number()), style));
        spans.push(Span::styled(step.title(), style));
    }

    let stepper = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(stepper, area);
}

fn render_step_fields(f: &mut Frame, area: Rect, surface: &TuiSurface, form: &AssessmentForm) {
    let fields: Vec<&FieldSpec> = fields_for_step(surface.step()).collect();
    let focused = surface.focused_field();
    let invalid = surface.invalid().map(|i| i.field);

    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(2)
        .split(area);

    for (i, spec) in fields.iter().enumerate() {
        let is_focused = focused == Some(spec.id);
        let border_style = if invalid == Some(spec.id) {
            HeartTheme::danger()
        } else if is_focused {
            HeartTheme::border_focused()
        } else {
            HeartTheme::border()
        };
        let title_style = if is_focused {
            HeartTheme::focused()
        } else {
            HeartTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", spec.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = form.value(spec.id);
        let value_display = match spec.kind {
            FieldKind::Select(_) => match form.selected_label(spec.id) {
                Some(label) => Span::styled(format!("‹ {} ›", label), HeartTheme::text()),
                None => Span::styled(format!("‹ {} ›", spec.hint), HeartTheme::text_muted()),
            },
            _ if value.is_empty() => Span::styled(spec.hint, HeartTheme::text_muted()),
            _ => Span::styled(value.to_string(), HeartTheme::text()),
        };

        let cursor = if is_focused && !matches!(spec.kind, FieldKind::Select(_)) {
            Span::styled("▌", HeartTheme::focused())
        } else {
            Span::raw("")
        };

        let content = Paragraph::new(Line::from(vec![Span::raw(" "), value_display, cursor]))
            .block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, surface: &TuiSurface) {
    if let Some(invalid) = surface.invalid() {
        let error = Paragraph::new(Line::from(vec![
            Span::styled("! ", HeartTheme::danger()),
            Span::styled(invalid.to_string(), HeartTheme::danger()),
        ]))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(HeartTheme::border()),
        );
        f.render_widget(error, area);
        return;
    }

    let enter = if surface.step() == Step::Three {
        "Analyze"
    } else {
        "Next"
    };
    let mut hints = vec![("↑↓", "Field"), ("←→", "Choose"), ("Enter", enter)];
    if surface.step() != Step::One {
        hints.push(("Esc", "Back"));
    }
    hints.push(("S", "Sample Data"));
    hints.push(("Ctrl+Q", "Quit"));
    render_key_hints(f, area, &hints);
}
