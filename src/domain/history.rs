//! Past assessments as returned by `/api/history`, and the client-side date filter.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Server-side risk classification stored with each prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Other(String),
}

impl From<String> for RiskLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "LOW_RISK" => Self::Low,
            "MODERATE_RISK" => Self::Moderate,
            "HIGH_RISK" => Self::High,
            _ => Self::Other(raw),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.as_str().to_string()
    }
}

impl RiskLevel {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "LOW_RISK",
            Self::Moderate => "MODERATE_RISK",
            Self::High => "HIGH_RISK",
            Self::Other(raw) => raw,
        }
    }

    /// Badge text: the wire value with its first underscore replaced by a space.
    #[must_use]
    pub fn badge_label(&self) -> String {
        self.as_str().replacen('_', " ", 1)
    }

    /// Badge (background, foreground) colors. Unknown levels use the low-risk pair.
    #[must_use]
    pub fn badge_colors(&self) -> ((u8, u8, u8), (u8, u8, u8)) {
        match self {
            Self::Moderate => ((254, 243, 199), (146, 64, 14)), // #fef3c7 / #92400e
            Self::High => ((254, 226, 226), (153, 27, 27)),     // #fee2e2 / #991b1b
            Self::Low | Self::Other(_) => ((220, 252, 231), (22, 101, 52)), // #dcfce7 / #166534
        }
    }
}

/// One persisted past assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    #[serde(default)]
    pub id: Option<i64>,
    pub created_at: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub resting_blood_pressure: Option<i64>,
    #[serde(default)]
    pub cholesterol: Option<i64>,
    #[serde(default)]
    pub risk_percentage: Option<f64>,
    pub risk_level: RiskLevel,
}

impl HistoryRow {
    /// Calendar date of `created_at`, used as the filter key.
    ///
    /// Accepts RFC 3339, naive ISO 8601 (`datetime.isoformat()`), and SQLite
    /// `CURRENT_TIMESTAMP` formats.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.created_at)
    }

    /// ISO calendar date string (`YYYY-MM-DD`), or `None` if `created_at` is unparseable.
    #[must_use]
    pub fn filter_key(&self) -> Option<String> {
        self.date().map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Date column text.
    #[must_use]
    pub fn display_date(&self) -> String {
        match self.date() {
            Some(d) => d.format("%m/%d/%Y").to_string(),
            None => self.created_at.clone(),
        }
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Loaded history rows plus the active date filter.
#[derive(Debug, Clone, Default)]
pub struct HistoryTable {
    rows: Vec<HistoryRow>,
    filter: String,
}

impl HistoryTable {
    /// Replace all rows with a fresh fetch. The filter is kept.
    pub fn replace(&mut self, rows: Vec<HistoryRow>) {
        self.rows = rows;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into().trim().to_string();
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `row` passes the current filter. An empty filter shows everything.
    #[must_use]
    pub fn is_visible(&self, row: &HistoryRow) -> bool {
        self.filter.is_empty() || row.filter_key().as_deref() == Some(self.filter.as_str())
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &HistoryRow> {
        self.rows.iter().filter(|row| self.is_visible(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(created_at: &str, level: &str) -> HistoryRow {
        HistoryRow {
            id: None,
            created_at: created_at.to_string(),
            age: Some(52),
            resting_blood_pressure: Some(130),
            cholesterol: Some(240),
            risk_percentage: Some(50.0),
            risk_level: RiskLevel::from(level.to_string()),
        }
    }

    #[test]
    fn test_filter_key_formats() {
        assert_eq!(
            row("2026-10-16T09:15:02.123456", "LOW_RISK").filter_key().as_deref(),
            Some("2026-10-16")
        );
        assert_eq!(
            row("2026-10-15 23:59:59", "LOW_RISK").filter_key().as_deref(),
            Some("2026-10-15")
        );
        assert_eq!(
            row("2026-10-14T08:00:00+02:00", "LOW_RISK").filter_key().as_deref(),
            Some("2026-10-14")
        );
        assert_eq!(row("yesterday", "LOW_RISK").filter_key(), None);
    }

    #[test]
    fn test_empty_filter_shows_all() {
        let mut table = HistoryTable::default();
        table.replace(vec![
            row("2026-10-16T09:00:00", "LOW_RISK"),
            row("2026-10-15T09:00:00", "HIGH_RISK"),
            row("garbage", "HIGH_RISK"),
        ]);
        table.set_filter("");
        assert_eq!(table.visible_rows().count(), 3);
    }

    #[test]
    fn test_filter_exact_date_match() {
        let mut table = HistoryTable::default();
        table.replace(vec![
            row("2026-10-16T09:00:00", "LOW_RISK"),
            row("2026-10-16T18:00:00", "MODERATE_RISK"),
            row("2026-10-15T09:00:00", "HIGH_RISK"),
        ]);
        table.set_filter("2026-10-16");
        assert_eq!(table.visible_rows().count(), 2);

        table.set_filter("2020-01-01");
        assert_eq!(table.visible_rows().count(), 0);
    }

    #[test]
    fn test_filter_survives_reload() {
        let mut table = HistoryTable::default();
        table.set_filter("2026-10-15");
        table.replace(vec![
            row("2026-10-16T09:00:00", "LOW_RISK"),
            row("2026-10-15T09:00:00", "HIGH_RISK"),
        ]);
        assert_eq!(table.visible_rows().count(), 1);
    }

    #[test]
    fn test_badges() {
        assert_eq!(RiskLevel::from("HIGH_RISK".to_string()), RiskLevel::High);
        assert_eq!(RiskLevel::High.badge_label(), "HIGH RISK");
        assert_eq!(RiskLevel::Other("VERY_HIGH_RISK".into()).badge_label(), "VERY HIGH_RISK");
        assert_eq!(
            RiskLevel::Other("?".into()).badge_colors(),
            RiskLevel::Low.badge_colors()
        );
    }

    #[test]
    fn test_row_deserializes_sqlite_dict() {
        let body = serde_json::json!({
            "id": 7, "age": 61, "sex": 1, "chest_pain_type": 0,
            "resting_blood_pressure": 150, "cholesterol": 280,
            "st_depression": 1.2, "risk_percentage": 83.3,
            "risk_level": "HIGH_RISK", "created_at": "2026-10-16T11:20:00.000001"
        });
        let row: HistoryRow = serde_json::from_value(body).expect("Should parse");
        assert_eq!(row.risk_level, RiskLevel::High);
        assert_eq!(row.cholesterol, Some(280));
        assert_eq!(row.display_date(), "10/16/2026");
    }
}
