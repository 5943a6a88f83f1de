//! Application layer: the view/step controller and its request plumbing.
//!
//! This module orchestrates domain logic with ports to implement the
//! user-facing operations of the assessment client.

mod controller;
mod dispatch;

pub use controller::{
    Confirmation, Controller, CLEAR_HISTORY_PROMPT, CONNECTIVITY_ALERT, DETAILS_ALERT,
    HISTORY_FAILED_TEXT, LOGGED_OUT_ALERT, LOGIN_NETWORK_ALERT, LOGIN_REQUIRED_ALERT,
};
pub use dispatch::{ApiRequest, Completion};
