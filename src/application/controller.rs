//! View/step controller: turns user actions into state transitions and
//! network requests, and projects the results onto a `RenderSurface`.
//!
//! The controller never performs I/O itself. Operations that need the
//! network return an [`ApiRequest`]; the caller dispatches it (on a worker,
//! or inline in tests) and feeds the [`Completion`] back through
//! [`Controller::complete`], which may in turn ask for a follow-up request.

use chrono::NaiveDate;

use crate::domain::{
    assessment::FIELD_SPECS, format_percent, AssessmentForm, AssessmentInput, AssessmentResult,
    AuthState, Credentials, DisplayItem, FieldId, GaugeView, HistoryRow, HistoryTable,
    LoginSurface, Step, WizardState,
};
use crate::ports::{
    ApiError, ClearReply, HistoryDisplay, ListSlot, LoginReply, Panel, PredictReply,
    RenderSurface, TextSlot, View,
};

use super::dispatch::{ApiRequest, Completion};

pub const CONNECTIVITY_ALERT: &str = "Error connecting to server.";
pub const LOGIN_NETWORK_ALERT: &str = "Network error during login. Please try again.";
pub const CLEAR_HISTORY_PROMPT: &str = "Are you sure you want to delete all history?";
pub const LOGIN_REQUIRED_ALERT: &str = "Please login first to clear history.";
pub const LOGGED_OUT_ALERT: &str = "Logged out";
pub const DETAILS_ALERT: &str = "Details view coming soon!";
pub const HISTORY_FAILED_TEXT: &str = "Could not load history.";

/// A yes/no question awaiting the user's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    ClearHistory,
}

#[derive(Debug, Clone, Copy, Default)]
struct InFlight {
    predict: bool,
    login: bool,
}

/// Owner of all client-side UI state.
#[derive(Debug, Clone)]
pub struct Controller {
    view: View,
    wizard: WizardState,
    form: AssessmentForm,
    history: HistoryTable,
    auth: AuthState,
    in_flight: InFlight,
    pending_confirmation: Option<Confirmation>,
    results_shown: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: View::Assessment,
            wizard: WizardState::default(),
            form: AssessmentForm::default(),
            history: HistoryTable::default(),
            auth: AuthState::default(),
            in_flight: InFlight::default(),
            pending_confirmation: None,
            results_shown: false,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    #[must_use]
    pub fn form(&self) -> &AssessmentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AssessmentForm {
        &mut self.form
    }

    #[must_use]
    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    #[must_use]
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    #[must_use]
    pub fn is_predicting(&self) -> bool {
        self.in_flight.predict
    }

    #[must_use]
    pub fn is_logging_in(&self) -> bool {
        self.in_flight.login
    }

    #[must_use]
    pub fn pending_confirmation(&self) -> Option<Confirmation> {
        self.pending_confirmation
    }

    #[must_use]
    pub fn results_shown(&self) -> bool {
        self.results_shown
    }

    /// Initial projection at startup. Returns the auth-status request.
    pub fn start(&mut self, surface: &mut impl RenderSurface, today: NaiveDate) -> ApiRequest {
        tracing::info!("Starting controller");
        surface.write_text(TextSlot::CurrentDate, &today.format("%A, %B %-d, %Y").to_string());
        surface.set_visible(Panel::IntroOverlay, true);
        surface.set_visible(Panel::AssessmentForm, true);
        surface.set_visible(Panel::Stepper, true);
        surface.set_visible(Panel::Results, false);
        surface.activate_view(self.view);
        self.show_wizard(surface);
        surface.render_gauge(GaugeView::reset());
        self.render_auth(surface);
        self.check_auth_status()
    }

    // === Navigation ===

    /// Activate `view`. Switching to history triggers a reload.
    pub fn switch_tab(&mut self, view: View, surface: &mut impl RenderSurface) -> Option<ApiRequest> {
        self.view = view;
        surface.activate_view(view);
        if view == View::History {
            Some(self.load_history(surface))
        } else {
            None
        }
    }

    /// Like [`switch_tab`](Self::switch_tab) for a view identifier.
    /// Unknown identifiers change nothing.
    pub fn switch_tab_by_id(
        &mut self,
        id: &str,
        surface: &mut impl RenderSurface,
    ) -> Option<ApiRequest> {
        match View::from_id(id) {
            Some(view) => self.switch_tab(view, surface),
            None => {
                tracing::debug!(view = id, "Ignoring unknown view");
                None
            }
        }
    }

    // === Wizard ===

    /// Move to `target` if every field of the current step is valid.
    /// Otherwise the first invalid field is reported and nothing changes.
    pub fn advance_step(&mut self, target: Step, surface: &mut impl RenderSurface) -> bool {
        let current = self.wizard.current();
        if let Some(invalid) = self.form.first_invalid(current) {
            tracing::debug!(step = current.number(), "Step validation failed");
            surface.report_invalid(Some(&invalid));
            return false;
        }

        surface.report_invalid(None);
        self.wizard.advance_to(target);
        self.show_wizard(surface);
        true
    }

    /// Move back to `target`. Unguarded.
    pub fn retreat_step(&mut self, target: Step, surface: &mut impl RenderSurface) {
        surface.report_invalid(None);
        self.wizard.retreat_to(target);
        self.show_wizard(surface);
    }

    fn show_wizard(&self, surface: &mut impl RenderSurface) {
        surface.show_step(self.wizard.current(), self.wizard.indicators());
    }

    // === Prediction ===

    /// Validate the final step and request a prediction.
    ///
    /// Returns `None` if validation fails or a prediction is already in flight.
    pub fn submit_assessment(&mut self, surface: &mut impl RenderSurface) -> Option<ApiRequest> {
        if self.in_flight.predict {
            tracing::debug!("Prediction already in flight; ignoring submit");
            return None;
        }

        if let Some(invalid) = self.form.first_invalid(Step::Three) {
            surface.report_invalid(Some(&invalid));
            return None;
        }

        let input = match self.form.to_input() {
            Ok(input) => input,
            Err(invalid) => {
                surface.report_invalid(Some(&invalid));
                return None;
            }
        };

        surface.report_invalid(None);
        surface.set_visible(Panel::Loading, true);
        self.in_flight.predict = true;
        Some(ApiRequest::Predict(input))
    }

    fn on_predict(
        &mut self,
        input: AssessmentInput,
        outcome: Result<PredictReply, ApiError>,
        surface: &mut impl RenderSurface,
    ) {
        self.in_flight.predict = false;
        surface.set_visible(Panel::Loading, false);

        match outcome {
            Ok(PredictReply::Accepted(result)) => self.render_result(&result, &input, surface),
            Ok(PredictReply::Rejected(message)) => {
                tracing::warn!("Prediction rejected by server");
                surface.alert(&message);
            }
            Err(e) => {
                tracing::error!("Prediction request failed: {}", e);
                surface.alert(CONNECTIVITY_ALERT);
            }
        }
    }

    /// Hide the form and project `result` onto the results dashboard.
    pub fn render_result(
        &mut self,
        result: &AssessmentResult,
        input: &AssessmentInput,
        surface: &mut impl RenderSurface,
    ) {
        surface.set_visible(Panel::AssessmentForm, false);
        surface.set_visible(Panel::Stepper, false);
        surface.set_visible(Panel::Results, true);

        surface.write_text(
            TextSlot::MetricBloodPressure,
            &format!("{} mmHg", input.resting_blood_pressure),
        );
        surface.write_text(TextSlot::MetricCholesterol, &format!("{} mg/dl", input.cholesterol));
        surface.write_text(TextSlot::MetricHeartRate, &format!("{} bpm", input.max_heart_rate));

        let gauge = GaugeView::for_percent(result.risk_percentage);
        surface.render_gauge(gauge);
        surface.write_text(TextSlot::RiskPercentage, &format_percent(result.risk_percentage));
        surface.write_text(TextSlot::RiskLevel, result.tier().label());
        surface.write_text(TextSlot::RiskMessage, &result.message);

        surface.render_list(
            ListSlot::Precautions,
            &DisplayItem::parse_all(&result.precautions.precautions),
        );
        surface.render_list(
            ListSlot::FoodsToEat,
            &DisplayItem::parse_all(&result.diet_plan.foods_to_eat),
        );
        surface.render_list(
            ListSlot::FoodsToAvoid,
            &DisplayItem::parse_all(&result.diet_plan.foods_to_avoid),
        );

        self.results_shown = true;
    }

    /// Return to an empty form at step 1.
    pub fn reset_assessment(&mut self, surface: &mut impl RenderSurface) {
        surface.set_visible(Panel::Results, false);
        surface.set_visible(Panel::AssessmentForm, true);
        surface.set_visible(Panel::Stepper, true);

        self.form.clear();
        let fields: Vec<FieldId> = FIELD_SPECS.iter().map(|spec| spec.id).collect();
        surface.clear_form_inputs(&fields);

        surface.report_invalid(None);
        self.wizard.reset();
        self.show_wizard(surface);
        surface.render_gauge(GaugeView::reset());
        self.results_shown = false;
    }

    // === History ===

    /// Show the placeholder row and request the history list.
    pub fn load_history(&mut self, surface: &mut impl RenderSurface) -> ApiRequest {
        surface.render_history(HistoryDisplay::Loading);
        ApiRequest::History
    }

    fn on_history(
        &mut self,
        outcome: Result<Vec<HistoryRow>, ApiError>,
        surface: &mut impl RenderSurface,
    ) {
        match outcome {
            Ok(rows) => {
                tracing::debug!(rows = rows.len(), "History loaded");
                self.history.replace(rows);
                self.render_history_rows(surface);
            }
            Err(e) => {
                tracing::warn!("History request failed: {}", e);
                self.history.replace(Vec::new());
                surface.render_history(HistoryDisplay::Failed(HISTORY_FAILED_TEXT.to_string()));
            }
        }
    }

    fn render_history_rows(&self, surface: &mut impl RenderSurface) {
        if self.history.is_empty() {
            surface.render_history(HistoryDisplay::Empty);
            return;
        }

        let rows = self.history.rows().to_vec();
        let visible = rows.iter().map(|row| self.history.is_visible(row)).collect();
        surface.render_history(HistoryDisplay::Rows { rows, visible });
    }

    /// Show only rows whose calendar date equals `filter` (`YYYY-MM-DD`).
    /// An empty filter shows every row. No network call.
    pub fn filter_history(&mut self, filter: &str, surface: &mut impl RenderSurface) {
        self.history.set_filter(filter);
        if !self.history.is_empty() {
            self.render_history_rows(surface);
        }
    }

    /// Ask the user to confirm deleting all history.
    pub fn request_clear_history(&mut self, surface: &mut impl RenderSurface) {
        self.pending_confirmation = Some(Confirmation::ClearHistory);
        surface.open_confirm(CLEAR_HISTORY_PROMPT);
    }

    /// Answer the pending confirmation prompt.
    pub fn resolve_confirmation(
        &mut self,
        accepted: bool,
        _surface: &mut impl RenderSurface,
    ) -> Option<ApiRequest> {
        match (self.pending_confirmation.take(), accepted) {
            (Some(Confirmation::ClearHistory), true) => Some(ApiRequest::ClearHistory),
            _ => None,
        }
    }

    fn on_clear_history(
        &mut self,
        outcome: Result<ClearReply, ApiError>,
        surface: &mut impl RenderSurface,
    ) -> Option<ApiRequest> {
        match outcome {
            Ok(ClearReply::Cleared { message }) => {
                tracing::info!("{}", message);
                Some(self.load_history(surface))
            }
            Ok(ClearReply::Unauthorized) => {
                surface.alert(LOGIN_REQUIRED_ALERT);
                self.open_login_modal(surface);
                None
            }
            Ok(ClearReply::Failed { error }) => {
                tracing::warn!("Clear history failed");
                if let Some(error) = error {
                    surface.alert(&error);
                }
                None
            }
            Err(e) => {
                tracing::error!("Clear history request failed: {}", e);
                surface.alert(CONNECTIVITY_ALERT);
                None
            }
        }
    }

    /// Placeholder for the per-row detail action.
    pub fn show_history_details(&self, surface: &mut impl RenderSurface) {
        surface.alert(DETAILS_ALERT);
    }

    // === Auth ===

    #[must_use]
    pub fn check_auth_status(&self) -> ApiRequest {
        ApiRequest::AuthStatus
    }

    fn on_auth_status(
        &mut self,
        outcome: Result<AuthState, ApiError>,
        surface: &mut impl RenderSurface,
    ) {
        match outcome {
            Ok(state) => {
                self.auth = state;
                self.render_auth(surface);
            }
            Err(e) => {
                tracing::warn!("Auth status request failed: {}", e);
            }
        }
    }

    fn render_auth(&self, surface: &mut impl RenderSurface) {
        surface.render_profile(&self.auth.profile_card());
        surface.write_text(TextSlot::Greeting, &self.auth.greeting());
    }

    /// Submit credentials from either login form.
    ///
    /// Returns `None` while another login is in flight.
    pub fn handle_login(
        &mut self,
        credentials: Credentials,
        origin: LoginSurface,
    ) -> Option<ApiRequest> {
        if self.in_flight.login {
            tracing::debug!("Login already in flight; ignoring submit");
            return None;
        }
        self.in_flight.login = true;
        Some(ApiRequest::Login {
            credentials,
            origin,
        })
    }

    fn on_login(
        &mut self,
        origin: LoginSurface,
        outcome: Result<LoginReply, ApiError>,
        surface: &mut impl RenderSurface,
    ) -> Option<ApiRequest> {
        self.in_flight.login = false;

        match outcome {
            Ok(LoginReply::Accepted) => {
                tracing::info!("Login accepted");
                match origin {
                    LoginSurface::Modal => self.close_login_modal(surface),
                    LoginSurface::Landing => self.enter_as_guest(surface),
                }
                Some(self.check_auth_status())
            }
            Ok(LoginReply::Rejected { error }) => {
                let message = error
                    .as_deref()
                    .filter(|e| !e.is_empty())
                    .unwrap_or(origin.fallback_error());
                surface.alert(message);
                None
            }
            Err(e) => {
                tracing::error!("Login request failed: {}", e);
                surface.alert(LOGIN_NETWORK_ALERT);
                None
            }
        }
    }

    #[must_use]
    pub fn logout(&self) -> ApiRequest {
        ApiRequest::Logout
    }

    fn on_logout(
        &mut self,
        outcome: Result<(), ApiError>,
        surface: &mut impl RenderSurface,
    ) -> Option<ApiRequest> {
        match outcome {
            Ok(()) => surface.alert(LOGGED_OUT_ALERT),
            Err(e) => {
                tracing::error!("Logout request failed: {}", e);
                surface.alert(CONNECTIVITY_ALERT);
            }
        }
        Some(self.check_auth_status())
    }

    pub fn open_login_modal(&mut self, surface: &mut impl RenderSurface) {
        surface.set_visible(Panel::LoginModal, true);
    }

    pub fn close_login_modal(&mut self, surface: &mut impl RenderSurface) {
        surface.set_visible(Panel::LoginModal, false);
    }

    /// Dismiss the intro overlay without signing in.
    pub fn enter_as_guest(&mut self, surface: &mut impl RenderSurface) {
        surface.set_visible(Panel::IntroOverlay, false);
    }

    // === Completions ===

    /// Apply the result of a dispatched request. Returns a follow-up request,
    /// if the result calls for one.
    pub fn complete(
        &mut self,
        completion: Completion,
        surface: &mut impl RenderSurface,
    ) -> Option<ApiRequest> {
        match completion {
            Completion::Login { origin, outcome } => self.on_login(origin, outcome, surface),
            Completion::Logout(outcome) => self.on_logout(outcome, surface),
            Completion::AuthStatus(outcome) => {
                self.on_auth_status(outcome, surface);
                None
            }
            Completion::Predict { input, outcome } => {
                self.on_predict(input, outcome, surface);
                None
            }
            Completion::History(outcome) => {
                self.on_history(outcome, surface);
                None
            }
            Completion::ClearHistory(outcome) => self.on_clear_history(outcome, surface),
        }
    }
}
