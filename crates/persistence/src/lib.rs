//! Persistence layer for the Fleet Telemetry backend.
//!
//! This crate contains:
//! - Database connection management and the bootstrap migration
//! - The `DocumentStore` abstraction with PostgreSQL and in-memory backends
//! - Entity definitions (database row mappings)
//! - Repository implementations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod store;
