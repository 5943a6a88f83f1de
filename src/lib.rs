//! # HeartGuard
//!
//! Terminal client for the HeartGuard cardiovascular risk assessment service.
//!
//! This crate provides:
//! - A three-step assessment wizard with per-field validation
//! - Risk prediction through the service's HTTP API, with a results dashboard
//! - Prediction history with client-side date filtering
//! - Session login/logout
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (form fields, wizard steps, results, history, auth)
//! - `ports`: Trait definitions for the HTTP service and the render surface
//! - `adapters`: Concrete implementations (reqwest client, log sanitizer)
//! - `application`: The view/step controller
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{ApiRequest, Completion, Controller};
pub use domain::{AssessmentInput, AssessmentResult, RiskTier};

/// Result type for HeartGuard operations
pub type Result<T> = std::result::Result<T, HeartGuardError>;

/// Main error type for HeartGuard
#[derive(Debug, thiserror::Error)]
pub enum HeartGuardError {
    #[error("API request failed: {0}")]
    Api(#[from] ports::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
