//! UI module: View components for the TUI.

pub mod about;
pub mod assessment;
pub mod history;
pub mod login;
pub mod results;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::domain::ProfileCard;
use crate::ports::{TextSlot, View};
use crate::tui::styles::HeartTheme;
use crate::tui::surface::TuiSurface;

/// Title bar: brand, greeting, date and the profile card.
pub fn render_header(f: &mut Frame, area: Rect, surface: &TuiSurface) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(38)])
        .split(area);

    let left = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" ♥ ", HeartTheme::danger()),
            Span::styled("HeartGuard AI", HeartTheme::title()),
            Span::styled(" │ ", HeartTheme::text_muted()),
            Span::styled(surface.text(TextSlot::Greeting), HeartTheme::subtitle()),
        ]),
        Line::from(Span::styled(
            format!("   {}", surface.text(TextSlot::CurrentDate)),
            HeartTheme::text_secondary(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(left, columns[0]);

    let card = match surface.profile() {
        ProfileCard::SignedIn {
            initial,
            name,
            role,
        } => vec![
            Line::from(vec![
                Span::styled(format!(" {} ", initial), HeartTheme::selected()),
                Span::raw(" "),
                Span::styled(name.clone(), HeartTheme::title()),
            ]),
            Line::from(vec![
                Span::styled(format!("     {}  ", role), HeartTheme::text_secondary()),
                Span::styled("[F5] ", HeartTheme::key_hint()),
                Span::styled("Logout", HeartTheme::key_desc()),
            ]),
        ],
        ProfileCard::SignedOut => vec![
            Line::from(Span::styled("MEMBER LOGIN", HeartTheme::subtitle())),
            Line::from(vec![
                Span::styled("[F5] ", HeartTheme::key_hint()),
                Span::styled("Sign In", HeartTheme::key_desc()),
            ]),
        ],
    };

    let right = Paragraph::new(card).alignment(Alignment::Right).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(right, columns[1]);
}

/// Navigation bar; exactly one item is highlighted.
pub fn render_nav(f: &mut Frame, area: Rect, active: View) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" F{} {} ", i + 1, view.title())))
        .collect();
    let selected = View::ALL.iter().position(|v| *v == active).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(HeartTheme::text_secondary())
        .highlight_style(HeartTheme::selected())
        .divider(Span::styled("│", HeartTheme::text_muted()));

    f.render_widget(tabs, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: HeartGuard AI provides indicative estimates and does not replace professional medical evaluation.",
        HeartTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(HeartTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Footer line of key hints.
pub fn render_key_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{}] ", key), HeartTheme::key_hint()),
                Span::styled(format!("{} ", desc), HeartTheme::key_desc()),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(footer, area);
}

/// Rect of the given size centered in `area`, clipped to it.
#[must_use]
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

fn render_popup(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, border: ratatui::style::Style) {
    let width = 60;
    let height = lines.len() as u16 + 4;
    let rect = centered_rect(area, width, height);

    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(HeartTheme::popup())
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", title), HeartTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(border),
        );

    f.render_widget(Clear, rect);
    f.render_widget(popup, rect);
}

/// Blocking notification.
pub fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    render_popup(
        f,
        area,
        "Notice",
        vec![
            Line::from(""),
            Line::from(Span::styled(message.to_string(), HeartTheme::text())),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Enter] ", HeartTheme::key_hint()),
                Span::styled("OK", HeartTheme::key_desc()),
            ]),
        ],
        HeartTheme::border_focused(),
    );
}

/// Yes/no prompt.
pub fn render_confirm(f: &mut Frame, area: Rect, prompt: &str) {
    render_popup(
        f,
        area,
        "Confirm",
        vec![
            Line::from(""),
            Line::from(Span::styled(prompt.to_string(), HeartTheme::text())),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Y] ", HeartTheme::key_hint()),
                Span::styled("Yes  ", HeartTheme::key_desc()),
                Span::styled("[N] ", HeartTheme::key_hint()),
                Span::styled("No", HeartTheme::key_desc()),
            ]),
        ],
        HeartTheme::danger(),
    );
}

/// Spinner shown while a prediction is pending.
pub fn render_loading(f: &mut Frame, area: Rect, tick: usize) {
    const FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
    let frame = FRAMES[tick % FRAMES.len()];
    render_popup(
        f,
        area,
        "Analyzing",
        vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Analyzing your heart health data...", frame),
                HeartTheme::info(),
            )),
        ],
        HeartTheme::border(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(area, 60, 10);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 15);
    }

    #[test]
    fn test_centered_rect_clips_to_small_area() {
        let area = Rect::new(0, 0, 30, 5);
        let rect = centered_rect(area, 60, 10);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 5);
    }
}
