//! Status check repository.

use domain::models::{Document, Filter, StatusCheck};
use std::sync::Arc;

use super::document::{from_document, to_document};
use crate::store::{DocumentStore, StoreError};

/// Maximum number of status checks returned by one listing.
pub const STATUS_LIST_LIMIT: usize = 1000;

/// Append-only log of status checks.
#[derive(Clone)]
pub struct StatusCheckRepository {
    store: Arc<dyn DocumentStore>,
}

impl StatusCheckRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Appends a status check. Never overwrites an existing record.
    pub async fn create(&self, check: StatusCheck) -> Result<StatusCheck, StoreError> {
        let doc = to_document(&check)?;
        self.store
            .insert(StatusCheck::COLLECTION, check.key(), doc)
            .await?;
        Ok(check)
    }

    /// Lists recorded status checks, capped at [`STATUS_LIST_LIMIT`].
    pub async fn list(&self) -> Result<Vec<StatusCheck>, StoreError> {
        let docs = self
            .store
            .find(StatusCheck::COLLECTION, &Filter::all(), STATUS_LIST_LIMIT)
            .await?;
        docs.into_iter().map(from_document).collect()
    }
}
