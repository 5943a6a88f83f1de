//! Color palette and preset styles.
//!
//! Dark clinical palette; risk colors match the web dashboard so screenshots
//! of either client read the same.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{RiskLevel, RiskTier, StepIndicator};

/// HeartGuard theme.
pub struct HeartTheme;

impl HeartTheme {
    // === Brand ===

    /// Rose red, primary accent
    pub const PRIMARY: Color = Color::Rgb(225, 29, 72); // #E11D48

    /// Lighter rose for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(251, 113, 133); // #FB7185

    /// Darker rose for header bars
    pub const PRIMARY_DARK: Color = Color::Rgb(159, 18, 57); // #9F1239

    /// Slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic ===

    pub const SUCCESS: Color = Color::Rgb(52, 211, 153); // #34D399
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(248, 113, 113); // #F87171
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Surfaces ===

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A
    pub const BG_CARD: Color = Color::Rgb(30, 41, 59); // #1E293B

    // === Text ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Selected table row or active nav tab
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn popup() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_CARD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Gauge and label color of a risk tier.
    #[must_use]
    pub fn tier(tier: RiskTier) -> Style {
        let (r, g, b) = tier.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }

    /// History badge colors.
    #[must_use]
    pub fn badge(level: &RiskLevel) -> Style {
        let ((br, bg, bb), (fr, fg, fb)) = level.badge_colors();
        Style::default()
            .bg(Color::Rgb(br, bg, bb))
            .fg(Color::Rgb(fr, fg, fb))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn step_indicator(indicator: StepIndicator) -> Style {
        match indicator {
            StepIndicator::Active => Self::focused(),
            StepIndicator::Completed => Self::success(),
            StepIndicator::Inactive => Self::text_muted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_colors_follow_domain() {
        assert_eq!(HeartTheme::tier(RiskTier::Low).fg, Some(Color::Rgb(52, 211, 153)));
        assert_eq!(HeartTheme::tier(RiskTier::High).fg, Some(HeartTheme::DANGER));
    }

    #[test]
    fn test_unknown_badge_uses_low_colors() {
        assert_eq!(
            HeartTheme::badge(&RiskLevel::Other("N/A".into())),
            HeartTheme::badge(&RiskLevel::Low)
        );
    }
}
