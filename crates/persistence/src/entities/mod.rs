//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod document;

pub use document::DocumentEntity;
