//! Past assessments table with a date filter.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::domain::{format_percent, HistoryRow};
use crate::ports::HistoryDisplay;
use crate::tui::styles::HeartTheme;
use crate::tui::surface::TuiSurface;

use super::render_key_hints;

/// Date filter input.
#[derive(Debug, Default)]
pub struct DateFilterState {
    pub buffer: String,
    pub editing: bool,
}

impl DateFilterState {
    /// `YYYY-MM-DD` is ten characters.
    const MAX_LEN: usize = 10;

    pub fn begin(&mut self) {
        self.editing = true;
    }

    pub fn input_char(&mut self, c: char) {
        if (c.is_ascii_digit() || c == '-') && self.buffer.len() < Self::MAX_LEN {
            self.buffer.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.buffer.pop();
    }

    /// Stop editing and return the filter to apply.
    pub fn commit(&mut self) -> &str {
        self.editing = false;
        &self.buffer
    }

    /// Stop editing and clear the filter.
    pub fn reset(&mut self) {
        self.editing = false;
        self.buffer.clear();
    }
}

pub fn render_history(f: &mut Frame, area: Rect, surface: &TuiSurface, filter: &DateFilterState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_filter(f, chunks[0], filter);
    render_table(f, chunks[1], surface);

    let hints: &[(&str, &str)] = if filter.editing {
        &[("Enter", "Apply"), ("Esc", "Show All")]
    } else {
        &[
            ("/", "Filter Date"),
            ("↑↓", "Select"),
            ("Enter", "Details"),
            ("R", "Reload"),
            ("X", "Clear History"),
            ("Ctrl+Q", "Quit"),
        ]
    };
    render_key_hints(f, chunks[2], hints);
}

fn render_filter(f: &mut Frame, area: Rect, filter: &DateFilterState) {
    let value = if filter.buffer.is_empty() && !filter.editing {
        Span::styled("all dates (YYYY-MM-DD)", HeartTheme::text_muted())
    } else {
        Span::styled(filter.buffer.clone(), HeartTheme::text())
    };
    let cursor = if filter.editing {
        Span::styled("▌", HeartTheme::focused())
    } else {
        Span::raw("")
    };

    let border = if filter.editing {
        HeartTheme::border_focused()
    } else {
        HeartTheme::border()
    };
    let input = Paragraph::new(Line::from(vec![Span::raw(" "), value, cursor])).block(
        Block::default()
            .title(Span::styled(" Filter by Date ", HeartTheme::text_secondary()))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(input, area);
}

fn render_table(f: &mut Frame, area: Rect, surface: &TuiSurface) {
    let block = Block::default()
        .title(Span::styled(" Assessment History ", HeartTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(HeartTheme::border());

    match surface.history() {
        HistoryDisplay::Loading => {
            f.render_widget(placeholder(block, "Loading...", HeartTheme::text_muted()), area);
        }
        HistoryDisplay::Empty => {
            f.render_widget(
                placeholder(block, "No records found.", HeartTheme::text_muted()),
                area,
            );
        }
        HistoryDisplay::Failed(message) => {
            f.render_widget(placeholder(block, message, HeartTheme::danger()), area);
        }
        HistoryDisplay::Rows { rows, visible } => {
            let selected = surface.history_selected();
            let shown: Vec<Row> = rows
                .iter()
                .zip(visible.iter())
                .filter(|(_, v)| **v)
                .map(|(row, _)| row)
                .enumerate()
                .map(|(i, row)| history_row(row, i == selected))
                .collect();

            let header = Row::new(vec![
                "Date",
                "Age",
                "BP",
                "Cholesterol",
                "Risk",
                "Level",
                "",
            ])
            .style(HeartTheme::text_secondary());

            let table = Table::new(
                shown,
                [
                    Constraint::Length(12),
                    Constraint::Length(5),
                    Constraint::Length(6),
                    Constraint::Length(12),
                    Constraint::Length(8),
                    Constraint::Length(16),
                    Constraint::Min(0),
                ],
            )
            .header(header)
            .block(block);
            f.render_widget(table, area);
        }
    }
}

fn placeholder<'a>(block: Block<'a>, text: &str, style: Style) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(text.to_string(), style))).block(block)
}

fn history_row(row: &HistoryRow, selected: bool) -> Row<'static> {
    let number = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    let risk = row
        .risk_percentage
        .map(format_percent)
        .unwrap_or_else(|| "-".to_string());

    let cells = vec![
        Cell::from(row.display_date()),
        Cell::from(number(row.age)),
        Cell::from(number(row.resting_blood_pressure)),
        Cell::from(number(row.cholesterol)),
        Cell::from(risk),
        Cell::from(Span::styled(
            format!(" {} ", row.risk_level.badge_label()),
            HeartTheme::badge(&row.risk_level),
        )),
        Cell::from(Span::styled(
            if selected { "[Details]" } else { "" },
            HeartTheme::key_hint(),
        )),
    ];

    let style = if selected {
        HeartTheme::focused()
    } else {
        HeartTheme::text()
    };
    Row::new(cells).style(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_date_characters_only() {
        let mut filter = DateFilterState::default();
        filter.begin();
        for c in "2024-03-0x5".chars() {
            filter.input_char(c);
        }
        assert_eq!(filter.buffer, "2024-03-05");
    }

    #[test]
    fn test_filter_length_is_capped() {
        let mut filter = DateFilterState::default();
        for c in "2024-03-051".chars() {
            filter.input_char(c);
        }
        assert_eq!(filter.buffer.len(), 10);
    }

    #[test]
    fn test_commit_and_reset() {
        let mut filter = DateFilterState::default();
        filter.begin();
        filter.input_char('2');
        assert_eq!(filter.commit(), "2");
        assert!(!filter.editing);

        filter.begin();
        filter.reset();
        assert!(filter.buffer.is_empty());
        assert!(!filter.editing);
    }
}
