//! Render port: what the controller can do to the screen.
//!
//! The controller never draws. It projects state onto a `RenderSurface`,
//! which a terminal view model (or a test recorder) implements.

use crate::domain::{
    DisplayItem, FieldId, GaugeView, HistoryRow, InvalidField, ProfileCard, Step, StepIndicator,
};

/// Top-level view selected from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Assessment,
    History,
    About,
}

impl View {
    pub const ALL: [View; 3] = [View::Assessment, View::History, View::About];

    /// Resolve a view identifier. Unknown identifiers resolve to `None`.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "assessment" => Some(Self::Assessment),
            "history" => Some(Self::History),
            "about" => Some(Self::About),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Assessment => "assessment",
            Self::History => "history",
            Self::About => "about",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Assessment => "Assessment",
            Self::History => "History",
            Self::About => "About",
        }
    }
}

/// Panels whose visibility the controller toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    AssessmentForm,
    Stepper,
    Results,
    Loading,
    LoginModal,
    IntroOverlay,
}

/// Single-line text slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    CurrentDate,
    Greeting,
    MetricBloodPressure,
    MetricCholesterol,
    MetricHeartRate,
    RiskPercentage,
    RiskLevel,
    RiskMessage,
}

/// List displays on the results dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSlot {
    Precautions,
    FoodsToEat,
    FoodsToAvoid,
}

/// Body of the history table.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryDisplay {
    /// Placeholder row while a fetch is pending.
    Loading,
    /// Empty-state row.
    Empty,
    /// Fetch failed; the message is shown in place of rows.
    Failed(String),
    /// Loaded rows; `visible` is parallel to `rows`.
    Rows {
        rows: Vec<HistoryRow>,
        visible: Vec<bool>,
    },
}

/// Capability set of the screen.
pub trait RenderSurface {
    /// Activate exactly `view`, deactivate all others, highlight its nav item,
    /// and scroll to the top.
    fn activate_view(&mut self, view: View);

    /// Show the container of `step` and update the stepper indicators.
    fn show_step(&mut self, step: Step, indicators: [StepIndicator; 3]);

    fn set_visible(&mut self, panel: Panel, visible: bool);

    fn write_text(&mut self, slot: TextSlot, text: &str);

    fn render_list(&mut self, slot: ListSlot, items: &[DisplayItem]);

    fn render_gauge(&mut self, gauge: GaugeView);

    fn render_profile(&mut self, card: &ProfileCard);

    fn render_history(&mut self, display: HistoryDisplay);

    /// Highlight a field that failed validation, or clear the highlight.
    fn report_invalid(&mut self, invalid: Option<&InvalidField>);

    /// Reset every form input to blank.
    fn clear_form_inputs(&mut self, fields: &[FieldId]);

    /// Blocking notification.
    fn alert(&mut self, message: &str);

    /// Show a yes/no prompt. The answer comes back through
    /// `Controller::resolve_confirmation`.
    fn open_confirm(&mut self, prompt: &str);
}
