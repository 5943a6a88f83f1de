//! Login forms: the landing overlay shown at start and the member login modal.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::Credentials;
use crate::tui::styles::HeartTheme;

use super::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Buffers of one login form.
#[derive(Default)]
pub struct LoginFormState {
    pub username: String,
    password: String,
    pub focus: LoginField,
}

impl LoginFormState {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    /// Masked password for display.
    #[must_use]
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    /// Build credentials and wipe the password buffer.
    pub fn take_credentials(&mut self) -> Credentials {
        let credentials = Credentials::new(self.username.trim(), self.password.as_str());
        self.password.zeroize();
        credentials
    }

    /// Wipe both buffers.
    pub fn clear(&mut self) {
        self.username.zeroize();
        self.password.zeroize();
        self.focus = LoginField::Username;
    }
}

impl std::fmt::Debug for LoginFormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFormState")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("focus", &self.focus)
            .finish()
    }
}

impl Drop for LoginFormState {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

fn render_fields(f: &mut Frame, area: Rect, form: &LoginFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let fields = [
        (LoginField::Username, "Username", form.username.clone()),
        (LoginField::Password, "Password", form.masked_password()),
    ];
    for (chunk, (field, label, value)) in chunks.iter().zip(fields) {
        let focused = form.focus == field;
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", label),
                if focused {
                    HeartTheme::focused()
                } else {
                    HeartTheme::text_secondary()
                },
            ))
            .borders(Borders::ALL)
            .border_style(if focused {
                HeartTheme::border_focused()
            } else {
                HeartTheme::border()
            });
        let cursor = if focused {
            Span::styled("▌", HeartTheme::focused())
        } else {
            Span::raw("")
        };
        let input = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(value, HeartTheme::text()),
            cursor,
        ]))
        .block(block);
        f.render_widget(input, *chunk);
    }
}

fn render_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{}] ", key), HeartTheme::key_hint()),
                Span::styled(format!("{}  ", desc), HeartTheme::key_desc()),
            ]
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Member login popup.
pub fn render_login_modal(f: &mut Frame, area: Rect, form: &LoginFormState) {
    let rect = centered_rect(area, 50, 12);
    let block = Block::default()
        .title(Span::styled(" Member Login ", HeartTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(HeartTheme::border_focused())
        .style(HeartTheme::popup());
    let inner = block.inner(rect);

    f.render_widget(Clear, rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .margin(1)
        .split(inner);

    render_fields(f, chunks[0], form);
    render_hints(
        f,
        chunks[1],
        &[("Tab", "Switch"), ("Enter", "Sign In"), ("Esc", "Close")],
    );
}

/// Full-screen landing overlay shown until the user signs in or continues as guest.
pub fn render_intro_overlay(f: &mut Frame, area: Rect, form: &LoginFormState) {
    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(HeartTheme::popup()), area);

    let rect = centered_rect(area, 56, 18);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Brand
            Constraint::Length(7), // Form
            Constraint::Min(0),    // Hints
        ])
        .split(rect);

    let brand = Paragraph::new(vec![
        Line::from(Span::styled("♥", HeartTheme::danger())),
        Line::from(Span::styled("HeartGuard AI", HeartTheme::title())),
        Line::from(Span::styled(
            "Cardiovascular risk assessment",
            HeartTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(brand, chunks[0]);

    render_fields(f, chunks[1], form);
    render_hints(
        f,
        chunks[2],
        &[("Tab", "Switch"), ("Enter", "Sign In"), ("Esc", "Continue as Guest")],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_goes_to_focused_field() {
        let mut form = LoginFormState::default();
        form.input_char('s');
        form.toggle_focus();
        form.input_char('p');
        form.input_char('w');

        assert_eq!(form.username, "s");
        assert_eq!(form.masked_password(), "••");
    }

    #[test]
    fn test_take_credentials_wipes_password() {
        let mut form = LoginFormState::default();
        for c in " sam ".chars() {
            form.input_char(c);
        }
        form.toggle_focus();
        for c in "secret".chars() {
            form.input_char(c);
        }

        let credentials = form.take_credentials();
        assert_eq!(credentials.username, "sam");
        assert_eq!(credentials.password, "secret");
        assert_eq!(form.masked_password(), "");
        assert_eq!(form.username, " sam ");
    }

    #[test]
    fn test_control_characters_are_ignored() {
        let mut form = LoginFormState::default();
        form.input_char('\t');
        assert!(form.username.is_empty());
    }

    #[test]
    fn test_clear_resets_focus() {
        let mut form = LoginFormState::default();
        form.toggle_focus();
        form.input_char('x');
        form.clear();
        assert_eq!(form.focus, LoginField::Username);
        assert_eq!(form.masked_password(), "");
    }
}
