//! Generic keyed-document repository.
//!
//! Devices and alerts share one contract: the caller owns the key, a create
//! fully replaces whatever is stored under it, and a patch merges named
//! fields into an existing document.

use domain::models::{Document, Filter, Patchable};
use serde::ser::Error as _;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use crate::store::{DocumentMap, DocumentStore, StoreError};

/// Maximum number of documents returned by one listing.
pub const LIST_LIMIT: usize = 2000;

/// Repository for one document collection.
pub struct DocumentRepository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for DocumentRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<T: Document> DocumentRepository<T> {
    /// Creates a new repository over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Creates or fully replaces the document keyed by `entity`'s id.
    ///
    /// Returns the entity as submitted.
    pub async fn upsert_one(&self, entity: T) -> Result<T, StoreError> {
        let doc = to_document(&entity)?;
        self.store.replace(T::COLLECTION, entity.key(), doc).await?;
        debug!(collection = T::COLLECTION, id = entity.key(), "Document upserted");
        Ok(entity)
    }

    /// Upserts every entity in input order, then returns the stored state
    /// of all touched keys.
    ///
    /// Duplicate keys within one batch resolve to the last occurrence. The
    /// returned order is storage order, not input order. An empty batch
    /// returns immediately without touching the store.
    pub async fn upsert_many(&self, entities: Vec<T>) -> Result<Vec<T>, StoreError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<String> = Vec::with_capacity(entities.len());
        for entity in &entities {
            let doc = to_document(entity)?;
            self.store.replace(T::COLLECTION, entity.key(), doc).await?;
            ids.push(entity.key().to_string());
        }
        ids.sort_unstable();
        ids.dedup();

        debug!(
            collection = T::COLLECTION,
            written = entities.len(),
            distinct = ids.len(),
            "Batch upserted"
        );

        let docs = self
            .store
            .find_by_ids(T::COLLECTION, &ids, LIST_LIMIT)
            .await?;
        docs.into_iter().map(from_document).collect()
    }

    /// Fetches the document with the given key.
    pub async fn get_by_id(&self, id: &str) -> Result<T, StoreError> {
        match self.store.find_one(T::COLLECTION, id).await? {
            Some(doc) => from_document(doc),
            None => Err(StoreError::NotFound {
                collection: T::COLLECTION,
                id: id.to_string(),
            }),
        }
    }

    /// Lists documents matching `filter`, capped at [`LIST_LIMIT`].
    pub async fn list(&self, filter: &Filter) -> Result<Vec<T>, StoreError> {
        let docs = self.store.find(T::COLLECTION, filter, LIST_LIMIT).await?;
        debug!(
            collection = T::COLLECTION,
            filtered = !filter.is_empty(),
            count = docs.len(),
            "Documents listed"
        );
        docs.into_iter().map(from_document).collect()
    }
}

impl<T: Patchable> DocumentRepository<T> {
    /// Merges `fields` into the stored document, then returns it.
    ///
    /// `fields` should already have passed [`Patchable::check_patch`].
    ///
    /// Fields not named are left untouched and names outside the formal
    /// schema are stored as given. Merging onto a missing key writes
    /// nothing; the follow-up fetch reports `NotFound`.
    pub async fn patch_by_id(&self, id: &str, fields: DocumentMap) -> Result<T, StoreError> {
        let matched = self.store.merge(T::COLLECTION, id, fields).await?;
        debug!(collection = T::COLLECTION, id, matched, "Document patched");
        self.get_by_id(id).await
    }
}

pub(crate) fn to_document<T: Document>(entity: &T) -> Result<DocumentMap, StoreError> {
    match serde_json::to_value(entity)? {
        Value::Object(doc) => Ok(doc),
        _ => Err(StoreError::Mapping(serde_json::Error::custom(
            "entity did not serialize to an object",
        ))),
    }
}

pub(crate) fn from_document<T: Document>(doc: DocumentMap) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}
