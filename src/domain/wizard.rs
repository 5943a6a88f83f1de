//! Three-step wizard state.

/// One of the three sequential form pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::One, Step::Two, Step::Three];

    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    #[must_use]
    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number().saturating_sub(1))
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::One => "Personal & Vitals",
            Self::Two => "Lab Results",
            Self::Three => "Cardiac Tests",
        }
    }
}

/// Visual state of a stepper indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIndicator {
    Inactive,
    Active,
    Completed,
}

impl StepIndicator {
    /// Indicator of `position` when `current` is the active step.
    #[must_use]
    pub fn for_position(position: Step, current: Step) -> Self {
        match position.cmp(&current) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Active,
            std::cmp::Ordering::Greater => Self::Inactive,
        }
    }
}

/// Current wizard step. Exactly one step is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    current: Step,
}

impl Default for WizardState {
    fn default() -> Self {
        Self { current: Step::One }
    }
}

impl WizardState {
    #[must_use]
    pub fn current(&self) -> Step {
        self.current
    }

    /// Move to `target`. Callers validate the current step first.
    pub fn advance_to(&mut self, target: Step) {
        self.current = target;
    }

    /// Move back to `target` without validation.
    pub fn retreat_to(&mut self, target: Step) {
        self.current = target;
    }

    pub fn reset(&mut self) {
        self.current = Step::One;
    }

    /// Indicator state for steps 1..=3.
    #[must_use]
    pub fn indicators(&self) -> [StepIndicator; 3] {
        Step::ALL.map(|s| StepIndicator::for_position(s, self.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_configuration() {
        let wizard = WizardState::default();
        assert_eq!(wizard.current(), Step::One);
        assert_eq!(
            wizard.indicators(),
            [StepIndicator::Active, StepIndicator::Inactive, StepIndicator::Inactive]
        );
    }

    #[test]
    fn test_advance_marks_lower_steps_completed() {
        let mut wizard = WizardState::default();
        wizard.advance_to(Step::Three);
        assert_eq!(
            wizard.indicators(),
            [StepIndicator::Completed, StepIndicator::Completed, StepIndicator::Active]
        );
    }

    #[test]
    fn test_retreat_clears_higher_steps() {
        let mut wizard = WizardState::default();
        wizard.advance_to(Step::Three);
        wizard.retreat_to(Step::Two);
        assert_eq!(
            wizard.indicators(),
            [StepIndicator::Completed, StepIndicator::Active, StepIndicator::Inactive]
        );
    }

    #[test]
    fn test_reset_from_any_state() {
        for step in Step::ALL {
            let mut wizard = WizardState::default();
            wizard.advance_to(step);
            wizard.reset();
            assert_eq!(wizard, WizardState::default());
        }
    }

    #[test]
    fn test_step_navigation_bounds() {
        assert_eq!(Step::One.prev(), None);
        assert_eq!(Step::One.next(), Some(Step::Two));
        assert_eq!(Step::Three.next(), None);
        assert_eq!(Step::from_number(0), None);
    }
}
