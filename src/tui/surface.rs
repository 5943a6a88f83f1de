//! Terminal view model.
//!
//! `TuiSurface` records everything the controller projects so the draw
//! functions in `ui` can render a frame from it. It also owns purely visual
//! state such as field focus, table selection and the alert queue.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::domain::{
    fields_for_step, DisplayItem, FieldId, GaugeView, InvalidField, ProfileCard, Step,
    StepIndicator,
};
use crate::ports::{HistoryDisplay, ListSlot, Panel, RenderSurface, TextSlot, View};

#[derive(Debug)]
pub struct TuiSurface {
    view: View,
    step: Step,
    indicators: [StepIndicator; 3],
    visible: HashSet<Panel>,
    texts: HashMap<TextSlot, String>,
    lists: HashMap<ListSlot, Vec<DisplayItem>>,
    gauge: GaugeView,
    profile: ProfileCard,
    history: HistoryDisplay,
    invalid: Option<InvalidField>,
    alerts: VecDeque<String>,
    confirm: Option<String>,
    /// Index of the focused field within the current step.
    focus: usize,
    /// Selected index among visible history rows.
    history_selected: usize,
}

impl Default for TuiSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiSurface {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: View::Assessment,
            step: Step::One,
            indicators: [
                StepIndicator::Active,
                StepIndicator::Inactive,
                StepIndicator::Inactive,
            ],
            visible: HashSet::new(),
            texts: HashMap::new(),
            lists: HashMap::new(),
            gauge: GaugeView::reset(),
            profile: ProfileCard::SignedOut,
            history: HistoryDisplay::Empty,
            invalid: None,
            alerts: VecDeque::new(),
            confirm: None,
            focus: 0,
            history_selected: 0,
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn indicators(&self) -> [StepIndicator; 3] {
        self.indicators
    }

    #[must_use]
    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible.contains(&panel)
    }

    /// Text written to `slot`, or an empty string.
    #[must_use]
    pub fn text(&self, slot: TextSlot) -> &str {
        self.texts.get(&slot).map(String::as_str).unwrap_or("")
    }

    #[must_use]
    pub fn list(&self, slot: ListSlot) -> &[DisplayItem] {
        self.lists.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn gauge(&self) -> GaugeView {
        self.gauge
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileCard {
        &self.profile
    }

    #[must_use]
    pub fn history(&self) -> &HistoryDisplay {
        &self.history
    }

    #[must_use]
    pub fn invalid(&self) -> Option<&InvalidField> {
        self.invalid.as_ref()
    }

    // === Dialogs ===

    /// Oldest undismissed alert.
    #[must_use]
    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    #[must_use]
    pub fn confirm_prompt(&self) -> Option<&str> {
        self.confirm.as_deref()
    }

    pub fn close_confirm(&mut self) {
        self.confirm = None;
    }

    // === Focus ===

    /// Field that has keyboard focus on the current step.
    #[must_use]
    pub fn focused_field(&self) -> Option<FieldId> {
        fields_for_step(self.step).nth(self.focus).map(|spec| spec.id)
    }

    pub fn focus_next(&mut self) {
        let count = fields_for_step(self.step).count();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = fields_for_step(self.step).count();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Number of rows currently shown in the history table.
    #[must_use]
    pub fn visible_history_rows(&self) -> usize {
        match &self.history {
            HistoryDisplay::Rows { visible, .. } => visible.iter().filter(|v| **v).count(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn history_selected(&self) -> usize {
        self.history_selected
    }

    pub fn select_history_next(&mut self) {
        let count = self.visible_history_rows();
        if count > 0 && self.history_selected + 1 < count {
            self.history_selected += 1;
        }
    }

    pub fn select_history_prev(&mut self) {
        self.history_selected = self.history_selected.saturating_sub(1);
    }
}

impl RenderSurface for TuiSurface {
    fn activate_view(&mut self, view: View) {
        self.view = view;
        self.history_selected = 0;
    }

    fn show_step(&mut self, step: Step, indicators: [StepIndicator; 3]) {
        if step != self.step {
            self.focus = 0;
        }
        self.step = step;
        self.indicators = indicators;
    }

    fn set_visible(&mut self, panel: Panel, visible: bool) {
        if visible {
            self.visible.insert(panel);
        } else {
            self.visible.remove(&panel);
        }
    }

    fn write_text(&mut self, slot: TextSlot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn render_list(&mut self, slot: ListSlot, items: &[DisplayItem]) {
        self.lists.insert(slot, items.to_vec());
    }

    fn render_gauge(&mut self, gauge: GaugeView) {
        self.gauge = gauge;
    }

    fn render_profile(&mut self, card: &ProfileCard) {
        self.profile = card.clone();
    }

    fn render_history(&mut self, display: HistoryDisplay) {
        self.history = display;
        let count = self.visible_history_rows();
        if self.history_selected >= count {
            self.history_selected = count.saturating_sub(1);
        }
    }

    fn report_invalid(&mut self, invalid: Option<&InvalidField>) {
        self.invalid = invalid.cloned();
        // Jump focus to the offending field, like the browser does.
        if let Some(field) = invalid.map(|i| i.field) {
            if let Some(pos) = fields_for_step(self.step).position(|spec| spec.id == field) {
                self.focus = pos;
            }
        }
    }

    fn clear_form_inputs(&mut self, _fields: &[FieldId]) {
        // Buffers live in the controller's form; only focus is visual.
        self.focus = 0;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push_back(message.to_string());
    }

    fn open_confirm(&mut self, prompt: &str) {
        self.confirm = Some(prompt.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HistoryRow, RiskLevel};

    fn row(created_at: &str) -> HistoryRow {
        HistoryRow {
            id: None,
            created_at: created_at.to_string(),
            age: Some(50),
            resting_blood_pressure: Some(120),
            cholesterol: Some(200),
            risk_percentage: Some(10.0),
            risk_level: RiskLevel::Low,
        }
    }

    #[test]
    fn test_alerts_queue_in_order() {
        let mut surface = TuiSurface::new();
        surface.alert("first");
        surface.alert("second");

        assert_eq!(surface.current_alert(), Some("first"));
        surface.dismiss_alert();
        assert_eq!(surface.current_alert(), Some("second"));
        surface.dismiss_alert();
        assert_eq!(surface.current_alert(), None);
    }

    #[test]
    fn test_panel_visibility() {
        let mut surface = TuiSurface::new();
        assert!(!surface.is_visible(Panel::Loading));
        surface.set_visible(Panel::Loading, true);
        assert!(surface.is_visible(Panel::Loading));
        surface.set_visible(Panel::Loading, false);
        assert!(!surface.is_visible(Panel::Loading));
    }

    #[test]
    fn test_focus_wraps_within_step() {
        let mut surface = TuiSurface::new();
        assert_eq!(surface.focused_field(), Some(FieldId::Age));

        surface.focus_prev();
        assert_eq!(surface.focused_field(), Some(FieldId::RestingBloodPressure));
        surface.focus_next();
        assert_eq!(surface.focused_field(), Some(FieldId::Age));
    }

    #[test]
    fn test_invalid_field_takes_focus() {
        let mut surface = TuiSurface::new();
        let invalid = InvalidField {
            field: FieldId::ChestPainType,
            message: "Please select an item in the list.".into(),
        };
        surface.report_invalid(Some(&invalid));

        assert_eq!(surface.focused_field(), Some(FieldId::ChestPainType));
        assert_eq!(surface.invalid(), Some(&invalid));
    }

    #[test]
    fn test_step_change_resets_focus() {
        let mut surface = TuiSurface::new();
        surface.focus_next();
        surface.show_step(
            Step::Two,
            [
                StepIndicator::Completed,
                StepIndicator::Active,
                StepIndicator::Inactive,
            ],
        );
        assert_eq!(surface.focused_field(), Some(FieldId::Cholesterol));
    }

    #[test]
    fn test_history_selection_clamps_to_visible_rows() {
        let mut surface = TuiSurface::new();
        surface.render_history(HistoryDisplay::Rows {
            rows: vec![row("2024-03-05"), row("2024-03-06"), row("2024-03-06")],
            visible: vec![true, true, true],
        });
        surface.select_history_next();
        surface.select_history_next();
        surface.select_history_next();
        assert_eq!(surface.history_selected(), 2);

        surface.render_history(HistoryDisplay::Rows {
            rows: vec![row("2024-03-05"), row("2024-03-06"), row("2024-03-06")],
            visible: vec![true, false, false],
        });
        assert_eq!(surface.history_selected(), 0);
    }
}
