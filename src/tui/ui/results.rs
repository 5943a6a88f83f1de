//! Results dashboard: vitals, risk gauge and recommendations.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::domain::{DisplayItem, ItemMark};
use crate::ports::{ListSlot, TextSlot};
use crate::tui::styles::HeartTheme;
use crate::tui::surface::TuiSurface;

use super::render_key_hints;

pub fn render_results(f: &mut Frame, area: Rect, surface: &TuiSurface) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Vitals
            Constraint::Length(7), // Gauge
            Constraint::Min(0),    // Recommendations
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_vitals(f, chunks[0], surface);
    render_gauge(f, chunks[1], surface);
    render_recommendations(f, chunks[2], surface);
    render_key_hints(f, chunks[3], &[("N", "New Assessment"), ("Ctrl+Q", "Quit")]);
}

fn render_vitals(f: &mut Frame, area: Rect, surface: &TuiSurface) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let metrics = [
        ("Blood Pressure", TextSlot::MetricBloodPressure),
        ("Cholesterol", TextSlot::MetricCholesterol),
        ("Max Heart Rate", TextSlot::MetricHeartRate),
    ];
    for (column, (label, slot)) in columns.iter().zip(metrics) {
        let card = Paragraph::new(Line::from(Span::styled(
            surface.text(slot).to_string(),
            HeartTheme::title(),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", label), HeartTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(HeartTheme::border()),
        );
        f.render_widget(card, *column);
    }
}

fn render_gauge(f: &mut Frame, area: Rect, surface: &TuiSurface) {
    let gauge_view = surface.gauge();
    let tier_style = gauge_view
        .tier
        .map(HeartTheme::tier)
        .unwrap_or_else(HeartTheme::text_muted);

    let block = Block::default()
        .title(Span::styled(" Risk Score ", HeartTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(HeartTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Level
            Constraint::Length(1), // Bar
            Constraint::Min(0),    // Message
        ])
        .horizontal_margin(1)
        .split(inner);

    let level = Paragraph::new(Line::from(Span::styled(
        surface.text(TextSlot::RiskLevel).to_string(),
        tier_style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(level, chunks[0]);

    let bar = Gauge::default()
        .gauge_style(tier_style)
        .ratio(gauge_view.filled_ratio())
        .label(surface.text(TextSlot::RiskPercentage).to_string());
    f.render_widget(bar, chunks[1]);

    let message = Paragraph::new(Line::from(Span::styled(
        surface.text(TextSlot::RiskMessage).to_string(),
        HeartTheme::text_secondary(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[2]);
}

fn render_recommendations(f: &mut Frame, area: Rect, surface: &TuiSurface) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_item_list(f, columns[0], "Precautions", surface.list(ListSlot::Precautions));
    render_item_list(f, columns[1], "Foods to Eat", surface.list(ListSlot::FoodsToEat));
    render_item_list(f, columns[2], "Foods to Avoid", surface.list(ListSlot::FoodsToAvoid));
}

fn render_item_list(f: &mut Frame, area: Rect, title: &str, items: &[DisplayItem]) {
    let items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let marker = match item.mark {
                ItemMark::Bullet => Span::styled("• ", HeartTheme::info()),
                ItemMark::Recommended => Span::styled("✓ ", HeartTheme::success()),
                ItemMark::Avoid => Span::styled("✗ ", HeartTheme::danger()),
                ItemMark::Plain => Span::raw(""),
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::styled(item.text.clone(), HeartTheme::text()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(format!(" {} ", title), HeartTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(list, area);
}
