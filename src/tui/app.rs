//! Main TUI application loop.
//!
//! Handles:
//! - Key routing to the controller (dialogs first, then overlays, then the active view)
//! - Dispatching controller requests to background workers
//! - Feeding worker completions back into the controller

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::HttpHealthApi;
use crate::application::{ApiRequest, Controller};
use crate::domain::{FieldKind, LoginSurface};
use crate::ports::{HealthApi, Panel, View};

use super::surface::TuiSurface;
use super::ui::{
    about::render_about,
    assessment::render_assessment,
    history::{render_history, DateFilterState},
    login::{render_intro_overlay, render_login_modal, LoginFormState},
    render_alert, render_confirm, render_disclaimer, render_header, render_loading, render_nav,
};
use super::worker::{ApiWorker, ApiWorkerHandle, WorkerPoll};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> crate::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> crate::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main application state
pub struct App {
    controller: Controller,

    /// What the controller last projected
    surface: TuiSurface,

    api: Arc<dyn HealthApi>,

    /// Requests still in flight
    workers: Vec<ApiWorkerHandle>,

    landing_form: LoginFormState,
    modal_form: LoginFormState,
    date_filter: DateFilterState,

    /// Frame counter for the loading spinner
    tick: usize,

    should_quit: bool,
}

impl App {
    /// Create the application against the service configured in the environment.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let api = HttpHealthApi::from_env()
            .map_err(|e| anyhow!("Failed to initialize HTTP client: {}", e))?;
        Ok(Self::with_api(Arc::new(api)))
    }

    /// Create the application with an injected API implementation.
    pub fn with_api(api: Arc<dyn HealthApi>) -> Self {
        Self {
            controller: Controller::new(),
            surface: TuiSurface::new(),
            api,
            workers: Vec::new(),
            landing_form: LoginFormState::default(),
            modal_form: LoginFormState::default(),
            date_filter: DateFilterState::default(),
            tick: 0,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        self.start();

        let mut terminal = setup_terminal()?;
        let result = self.main_loop(&mut terminal);
        restore_terminal(&mut terminal)?;

        result
    }

    fn start(&mut self) {
        let today = Local::now().date_naive();
        let request = self.controller.start(&mut self.surface, today);
        self.dispatch(Some(request));
    }

    fn main_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        loop {
            self.poll_workers();
            self.tick = self.tick.wrapping_add(1);

            terminal.draw(|f| self.draw(f))?;

            // Short poll to stay responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(1), // Nav
                Constraint::Min(0),    // View
                Constraint::Length(2), // Disclaimer
            ])
            .split(area);

        render_header(f, chunks[0], &self.surface);
        render_nav(f, chunks[1], self.surface.view());
        match self.surface.view() {
            View::Assessment => {
                render_assessment(f, chunks[2], &self.surface, self.controller.form())
            }
            View::History => render_history(f, chunks[2], &self.surface, &self.date_filter),
            View::About => render_about(f, chunks[2]),
        }
        render_disclaimer(f, chunks[3]);

        // Overlays, bottom to top
        if self.surface.is_visible(Panel::IntroOverlay) {
            render_intro_overlay(f, area, &self.landing_form);
        }
        if self.surface.is_visible(Panel::LoginModal) {
            render_login_modal(f, area, &self.modal_form);
        }
        if self.surface.is_visible(Panel::Loading) {
            render_loading(f, area, self.tick / 4);
        }
        if let Some(prompt) = self.surface.confirm_prompt() {
            render_confirm(f, area, prompt);
        }
        if let Some(message) = self.surface.current_alert() {
            render_alert(f, area, message);
        }
    }

    // === Requests ===

    fn dispatch(&mut self, request: Option<ApiRequest>) {
        if let Some(request) = request {
            self.workers.push(ApiWorker::spawn(self.api.clone(), request));
        }
    }

    /// Feed finished requests back into the controller.
    fn poll_workers(&mut self) {
        let mut completions = Vec::new();
        self.workers.retain_mut(|worker| match worker.poll() {
            WorkerPoll::Done(completion) => {
                tracing::debug!(request = worker.name(), "Request finished");
                completions.push(completion);
                false
            }
            WorkerPoll::Pending => true,
        });

        for completion in completions {
            let follow_up = self.controller.complete(completion, &mut self.surface);
            self.dispatch(follow_up);
        }
        self.sync_login_forms();
    }

    /// Wipe the buffers of login forms that are no longer shown.
    fn sync_login_forms(&mut self) {
        if !self.surface.is_visible(Panel::IntroOverlay) {
            self.landing_form.clear();
        }
        if !self.surface.is_visible(Panel::LoginModal) {
            self.modal_form.clear();
        }
    }

    // === Input ===

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Dialogs block everything underneath.
        if self.surface.current_alert().is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.surface.dismiss_alert();
            }
            return;
        }
        if self.surface.confirm_prompt().is_some() {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.answer_confirmation(true)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.answer_confirmation(false)
                }
                _ => {}
            }
            return;
        }
        if self.surface.is_visible(Panel::Loading) {
            return;
        }
        if self.surface.is_visible(Panel::IntroOverlay) {
            self.handle_login_form_key(key, LoginSurface::Landing);
            return;
        }
        if self.surface.is_visible(Panel::LoginModal) {
            self.handle_login_form_key(key, LoginSurface::Modal);
            return;
        }

        match key {
            KeyCode::F(1) => self.switch_tab(View::Assessment),
            KeyCode::F(2) => self.switch_tab(View::History),
            KeyCode::F(3) => self.switch_tab(View::About),
            KeyCode::F(5) => {
                if self.controller.auth().logged_in {
                    let request = self.controller.logout();
                    self.dispatch(Some(request));
                } else {
                    self.controller.open_login_modal(&mut self.surface);
                }
            }
            _ => match self.surface.view() {
                View::Assessment => self.handle_assessment_key(key),
                View::History => self.handle_history_key(key),
                View::About => {}
            },
        }
    }

    fn switch_tab(&mut self, view: View) {
        let request = self.controller.switch_tab(view, &mut self.surface);
        self.dispatch(request);
    }

    fn answer_confirmation(&mut self, accepted: bool) {
        self.surface.close_confirm();
        let request = self
            .controller
            .resolve_confirmation(accepted, &mut self.surface);
        self.dispatch(request);
    }

    fn handle_login_form_key(&mut self, key: KeyCode, origin: LoginSurface) {
        let form = match origin {
            LoginSurface::Landing => &mut self.landing_form,
            LoginSurface::Modal => &mut self.modal_form,
        };

        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_focus(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Enter => {
                let credentials = form.take_credentials();
                let request = self.controller.handle_login(credentials, origin);
                self.dispatch(request);
            }
            KeyCode::Esc => {
                match origin {
                    LoginSurface::Landing => self.controller.enter_as_guest(&mut self.surface),
                    LoginSurface::Modal => self.controller.close_login_modal(&mut self.surface),
                }
                self.sync_login_forms();
            }
            _ => {}
        }
    }

    fn handle_assessment_key(&mut self, key: KeyCode) {
        if self.surface.is_visible(Panel::Results) {
            if matches!(
                key,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter
            ) {
                self.controller.reset_assessment(&mut self.surface);
            }
            return;
        }

        let Some(field) = self.surface.focused_field() else {
            return;
        };
        let step = self.controller.wizard().current();

        match key {
            KeyCode::Up | KeyCode::BackTab => self.surface.focus_prev(),
            KeyCode::Down | KeyCode::Tab => self.surface.focus_next(),
            KeyCode::Left | KeyCode::Right => {
                if matches!(field.spec().kind, FieldKind::Select(_)) {
                    self.controller
                        .form_mut()
                        .cycle_option(field, key == KeyCode::Right);
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.controller.form_mut().load_sample_data();
            }
            KeyCode::Char(c) => self.controller.form_mut().input_char(field, c),
            KeyCode::Backspace => self.controller.form_mut().delete_char(field),
            KeyCode::Delete => self.controller.form_mut().set_value(field, String::new()),
            KeyCode::Enter => match step.next() {
                Some(next) => {
                    self.controller.advance_step(next, &mut self.surface);
                }
                None => {
                    let request = self.controller.submit_assessment(&mut self.surface);
                    self.dispatch(request);
                }
            },
            KeyCode::Esc => {
                if let Some(prev) = step.prev() {
                    self.controller.retreat_step(prev, &mut self.surface);
                }
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        if self.date_filter.editing {
            match key {
                KeyCode::Char(c) => self.date_filter.input_char(c),
                KeyCode::Backspace => self.date_filter.delete_char(),
                KeyCode::Enter => {
                    let filter = self.date_filter.commit().to_string();
                    self.controller.filter_history(&filter, &mut self.surface);
                }
                KeyCode::Esc => {
                    self.date_filter.reset();
                    self.controller.filter_history("", &mut self.surface);
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('/') => self.date_filter.begin(),
            KeyCode::Up => self.surface.select_history_prev(),
            KeyCode::Down => self.surface.select_history_next(),
            KeyCode::Enter => {
                if self.surface.visible_history_rows() > 0 {
                    self.controller.show_history_details(&mut self.surface);
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let request = self.controller.load_history(&mut self.surface);
                self.dispatch(Some(request));
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.controller.request_clear_history(&mut self.surface);
            }
            _ => {}
        }
    }
}
