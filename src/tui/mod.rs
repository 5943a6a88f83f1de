//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the client screens:
//! - Landing login and member login modal
//! - Three-step assessment wizard and results dashboard
//! - Assessment history with a date filter

mod app;
mod styles;
mod surface;
mod ui;
mod worker;

pub use app::App;
pub use styles::HeartTheme;
pub use surface::TuiSurface;
pub use worker::{ApiWorker, ApiWorkerHandle, WorkerPoll};
