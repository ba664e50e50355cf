//! Custom Axum extractors.
//!
//! Extractors for parsing and validating request data.

pub mod json;

pub use json::{ApiJson, ValidatedJson};
