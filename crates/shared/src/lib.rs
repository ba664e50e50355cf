//! Shared utilities and common types for the Fleet Telemetry backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Lenient ISO-8601 timestamp parsing and serde helpers
//! - Common validation logic

pub mod timestamp;
pub mod validation;
