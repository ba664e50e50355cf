//! Document store abstraction.
//!
//! A store holds named collections of JSON documents addressed by a string
//! key. Every single call is atomic for the document it touches; nothing
//! spans more than one call.

mod memory;
mod postgres;

use async_trait::async_trait;
use domain::models::Filter;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A stored document: top-level field name to JSON value.
pub type DocumentMap = Map<String, Value>;

/// Errors surfaced by stores and repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} document '{id}' not found")]
    NotFound { collection: &'static str, id: String },

    #[error("{collection} document '{id}' already exists")]
    Duplicate { collection: &'static str, id: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Document mapping failed: {0}")]
    Mapping(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Backing storage for document collections.
///
/// `collection` is always a `Document::COLLECTION` constant, never caller
/// input.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `doc` under `id`, creating or fully replacing it.
    async fn replace(
        &self,
        collection: &'static str,
        id: &str,
        doc: DocumentMap,
    ) -> Result<(), StoreError>;

    /// Writes `doc` under `id`; fails with `Duplicate` if the key exists.
    async fn insert(
        &self,
        collection: &'static str,
        id: &str,
        doc: DocumentMap,
    ) -> Result<(), StoreError>;

    /// Sets the given top-level fields on an existing document.
    ///
    /// Returns whether a document matched. A missing document is left
    /// missing.
    async fn merge(
        &self,
        collection: &'static str,
        id: &str,
        fields: DocumentMap,
    ) -> Result<bool, StoreError>;

    async fn find_one(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<DocumentMap>, StoreError>;

    /// Documents matching `filter`, at most `limit`, in storage order.
    async fn find(
        &self,
        collection: &'static str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<DocumentMap>, StoreError>;

    /// Documents whose key is in `ids`, at most `limit`, in storage order.
    async fn find_by_ids(
        &self,
        collection: &'static str,
        ids: &[String],
        limit: usize,
    ) -> Result<Vec<DocumentMap>, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases underlying resources. Called once at shutdown.
    async fn close(&self) {}
}
