//! API port: Trait for the HeartGuard HTTP service.
//!
//! This trait abstracts the transport (reqwest) from the controller. Every
//! method maps to exactly one endpoint and returns the interpreted reply;
//! server-side behavior is out of scope.

use crate::domain::{AssessmentInput, AssessmentResult, AuthState, Credentials, HistoryRow};

/// Transport-level failure: the request could not be completed or the body
/// could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Outcome of `/api/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReply {
    /// `200`: session established.
    Accepted,
    /// Any other status, with the server-supplied `error` if present.
    Rejected { error: Option<String> },
}

/// Outcome of `/api/predict`.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictReply {
    Accepted(AssessmentResult),
    /// Body carried an `error` field (application-level failure).
    Rejected(String),
}

/// Outcome of `/api/clear-history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearReply {
    /// Body carried a `message` field.
    Cleared { message: String },
    /// `401`: a session is required.
    Unauthorized,
    /// Anything else, with the server `error` if present.
    Failed { error: Option<String> },
}

/// Trait for the remote assessment service.
///
/// Implementations block until the response arrives; the TUI runs them on a
/// background worker so the event loop stays responsive.
pub trait HealthApi: Send + Sync {
    /// `POST /api/login`.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-JSON body.
    fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError>;

    /// `POST /api/logout`. The response body is ignored.
    ///
    /// # Errors
    /// Returns error on transport failure.
    fn logout(&self) -> Result<(), ApiError>;

    /// `GET /api/auth-status`.
    ///
    /// # Errors
    /// Returns error on transport failure or a malformed body.
    fn auth_status(&self) -> Result<AuthState, ApiError>;

    /// `POST /api/predict`.
    ///
    /// # Errors
    /// Returns error on transport failure or a malformed body.
    fn predict(&self, input: &AssessmentInput) -> Result<PredictReply, ApiError>;

    /// `GET /api/history`. A body without a `history` list yields no rows.
    ///
    /// # Errors
    /// Returns error on transport failure or a malformed body.
    fn history(&self) -> Result<Vec<HistoryRow>, ApiError>;

    /// `POST /api/clear-history`.
    ///
    /// # Errors
    /// Returns error on transport failure.
    fn clear_history(&self) -> Result<ClearReply, ApiError>;
}
