//! HTTP route handlers.

pub mod alerts;
pub mod devices;
pub mod health;
pub mod root;
pub mod status;
