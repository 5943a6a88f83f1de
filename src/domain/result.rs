//! Prediction results and their display projection.
//!
//! Represents the response of `/api/predict` and the derived risk tier and
//! gauge geometry.

use serde::{Deserialize, Serialize};

/// Radius of the circular risk gauge.
pub const GAUGE_RADIUS: f64 = 70.0;

/// Stroke offset the gauge is reset to (an empty ring).
pub const GAUGE_RESET_OFFSET: f64 = 440.0;

/// Circumference of the gauge ring.
#[must_use]
pub fn gauge_circumference() -> f64 {
    GAUGE_RADIUS * 2.0 * std::f64::consts::PI
}

/// Stroke offset for a risk percentage: full circumference at 0%, zero at 100%.
#[must_use]
pub fn gauge_offset(percent: f64) -> f64 {
    let circumference = gauge_circumference();
    circumference - (percent / 100.0) * circumference
}

/// Three-tier visual classification of a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// `percent < 34` is low, `34 <= percent < 67` moderate, otherwise high.
    #[must_use]
    pub fn classify(percent: f64) -> Self {
        if percent >= 67.0 {
            Self::High
        } else if percent >= 34.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        }
    }

    /// Ring color (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (52, 211, 153),       // #34d399
            Self::Moderate => (251, 191, 36),  // #fbbf24
            Self::High => (248, 113, 113),     // #f87171
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Format a percentage without a trailing `.0`.
#[must_use]
pub fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{}%", percent as i64)
    } else {
        format!("{}%", percent)
    }
}

/// Marker carried by a recommendation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMark {
    /// `"• "`
    Bullet,
    /// `"[OK] "`
    Recommended,
    /// `"[NO] "`
    Avoid,
    Plain,
}

impl ItemMark {
    const PREFIXES: [(&'static str, ItemMark); 3] = [
        ("• ", ItemMark::Bullet),
        ("[OK] ", ItemMark::Recommended),
        ("[NO] ", ItemMark::Avoid),
    ];
}

/// A recommendation line with its marker prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub mark: ItemMark,
    pub text: String,
}

impl DisplayItem {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        for (prefix, mark) in ItemMark::PREFIXES {
            if let Some(rest) = raw.strip_prefix(prefix) {
                return Self {
                    mark,
                    text: rest.to_string(),
                };
            }
        }
        Self {
            mark: ItemMark::Plain,
            text: raw.to_string(),
        }
    }

    #[must_use]
    pub fn parse_all(raw: &[String]) -> Vec<Self> {
        raw.iter().map(|s| Self::parse(s)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Precautions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub precautions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub foods_to_eat: Vec<String>,
    #[serde(default)]
    pub foods_to_avoid: Vec<String>,
}

/// Successful response of `/api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub risk_percentage: f64,
    pub message: String,
    pub precautions: Precautions,
    pub diet_plan: DietPlan,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl AssessmentResult {
    #[must_use]
    pub fn tier(&self) -> RiskTier {
        RiskTier::classify(self.risk_percentage)
    }
}

/// Gauge projection handed to the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeView {
    /// Percentage shown, or `None` for the reset ring.
    pub percent: Option<f64>,
    pub offset: f64,
    pub tier: Option<RiskTier>,
}

impl GaugeView {
    #[must_use]
    pub fn for_percent(percent: f64) -> Self {
        Self {
            percent: Some(percent),
            offset: gauge_offset(percent),
            tier: Some(RiskTier::classify(percent)),
        }
    }

    #[must_use]
    pub fn reset() -> Self {
        Self {
            percent: None,
            offset: GAUGE_RESET_OFFSET,
            tier: None,
        }
    }

    /// Fraction of the ring that is filled, in `0.0..=1.0`.
    #[must_use]
    pub fn filled_ratio(&self) -> f64 {
        (1.0 - self.offset / gauge_circumference()).clamp(0.0, 1.0)
    }
}
