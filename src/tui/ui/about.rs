//! Static About view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::HeartTheme;

use super::render_key_hints;

pub fn render_about(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let text = vec![
        Line::from(Span::styled("About HeartGuard AI", HeartTheme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "HeartGuard AI estimates the risk of heart disease from thirteen clinical \
             measurements: demographics, vitals, blood work, ECG and stress test findings.",
            HeartTheme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Each assessment returns a risk score with tailored precautions and a diet plan. \
             Signed-in members can review and clear their assessment history.",
            HeartTheme::text_secondary(),
        )),
    ];

    let about = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(about, chunks[0]);

    render_key_hints(f, chunks[1], &[("F1", "Assessment"), ("F2", "History"), ("Ctrl+Q", "Quit")]);
}
