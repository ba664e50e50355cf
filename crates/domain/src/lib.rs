//! Domain layer for the Fleet Telemetry backend.
//!
//! This crate contains:
//! - Entity shapes (Device, Alert, StatusCheck) and request payloads
//! - The `Document` contract shared by every stored entity, and `Patchable`
//!   for the ones that accept partial updates
//! - Field filters and patch checking used by the mapping layer

pub mod models;
