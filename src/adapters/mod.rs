//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the assessment service
//! - `sanitize`: credential filtering for logs

pub mod http;
pub mod sanitize;

pub use http::{HttpConfig, HttpHealthApi};
