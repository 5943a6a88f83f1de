//! Domain layer: Core assessment types and logic.
//!
//! Pure Rust types with no I/O. Everything the controller needs to decide a
//! transition lives here so it can be tested without a terminal or a server.

pub mod assessment;
mod auth;
mod history;
mod result;
mod wizard;

pub use assessment::{
    fields_for_step, AssessmentForm, AssessmentInput, FieldId, FieldKind, FieldSpec, InvalidField,
};
pub use auth::{AuthState, Credentials, LoginSurface, ProfileCard};
pub use history::{HistoryRow, HistoryTable, RiskLevel};
pub use result::{
    format_percent, gauge_circumference, gauge_offset, AssessmentResult, DietPlan, DisplayItem,
    GaugeView, ItemMark, Precautions, RiskTier, GAUGE_RADIUS, GAUGE_RESET_OFFSET,
};
pub use wizard::{Step, StepIndicator, WizardState};
