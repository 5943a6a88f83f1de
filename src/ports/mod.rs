//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the controller and the outside world (HTTP service, screen).

mod api;
mod render;

pub use api::{ApiError, ClearReply, HealthApi, LoginReply, PredictReply};
pub use render::{HistoryDisplay, ListSlot, Panel, RenderSurface, TextSlot, View};
