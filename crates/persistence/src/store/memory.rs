//! In-process document store.
//!
//! Used for tests and for running the API without a database. Collections
//! are kept ordered by key, which is the storage order listings return.

use async_trait::async_trait;
use domain::models::Filter;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{DocumentMap, DocumentStore, StoreError};

type Collection = BTreeMap<String, DocumentMap>;

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<&'static str, Collection>>,
    operations: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls served so far.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    fn touch(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn replace(
        &self,
        collection: &'static str,
        id: &str,
        doc: DocumentMap,
    ) -> Result<(), StoreError> {
        self.touch();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn insert(
        &self,
        collection: &'static str,
        id: &str,
        doc: DocumentMap,
    ) -> Result<(), StoreError> {
        self.touch();
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        if docs.contains_key(id) {
            return Err(StoreError::Duplicate {
                collection,
                id: id.to_string(),
            });
        }
        docs.insert(id.to_string(), doc);
        Ok(())
    }

    async fn merge(
        &self,
        collection: &'static str,
        id: &str,
        fields: DocumentMap,
    ) -> Result<bool, StoreError> {
        self.touch();
        let mut collections = self.collections.write().await;
        match collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) {
            Some(doc) => {
                doc.extend(fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_one(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<DocumentMap>, StoreError> {
        self.touch();
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn find(
        &self,
        collection: &'static str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<DocumentMap>, StoreError> {
        self.touch();
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter.matches(doc))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_ids(
        &self,
        collection: &'static str,
        ids: &[String],
        limit: usize,
    ) -> Result<Vec<DocumentMap>, StoreError> {
        self.touch();
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(id, _)| ids.contains(*id))
                    .map(|(_, doc)| doc.clone())
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> DocumentMap {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_replace_overwrites_whole_document() {
        let store = MemoryDocumentStore::new();
        store
            .replace("devices", "D1", doc(json!({"id": "D1", "a": 1, "b": 2})))
            .await
            .unwrap();
        store
            .replace("devices", "D1", doc(json!({"id": "D1", "a": 3})))
            .await
            .unwrap();

        let stored = store.find_one("devices", "D1").await.unwrap().unwrap();
        assert_eq!(stored, doc(json!({"id": "D1", "a": 3})));
        assert_eq!(store.len("devices").await, 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_key() {
        let store = MemoryDocumentStore::new();
        store
            .insert("status_checks", "s1", doc(json!({"id": "s1"})))
            .await
            .unwrap();
        let err = store
            .insert("status_checks", "s1", doc(json!({"id": "s1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_merge_keeps_other_fields() {
        let store = MemoryDocumentStore::new();
        store
            .replace("devices", "D1", doc(json!({"id": "D1", "a": 1, "b": 3})))
            .await
            .unwrap();
        let matched = store
            .merge("devices", "D1", doc(json!({"a": 9})))
            .await
            .unwrap();
        assert!(matched);

        let stored = store.find_one("devices", "D1").await.unwrap().unwrap();
        assert_eq!(stored, doc(json!({"id": "D1", "a": 9, "b": 3})));
    }

    #[tokio::test]
    async fn test_merge_missing_document_is_noop() {
        let store = MemoryDocumentStore::new();
        let matched = store
            .merge("devices", "nope", doc(json!({"a": 1})))
            .await
            .unwrap();
        assert!(!matched);
        assert!(store.find_one("devices", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_applies_filter_and_limit() {
        let store = MemoryDocumentStore::new();
        for (id, sector) in [("D1", "A"), ("D2", "A"), ("D3", "B")] {
            store
                .replace("devices", id, doc(json!({"id": id, "sector": sector})))
                .await
                .unwrap();
        }

        let a = store
            .find("devices", &Filter::eq("sector", "A"), 100)
            .await
            .unwrap();
        assert_eq!(a.len(), 2);

        let limited = store.find("devices", &Filter::all(), 2).await.unwrap();
        assert_eq!(limited.len(), 2);

        let none = store.find("alerts", &Filter::all(), 10).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_ids() {
        let store = MemoryDocumentStore::new();
        for id in ["D1", "D2", "D3"] {
            store
                .replace("devices", id, doc(json!({"id": id})))
                .await
                .unwrap();
        }

        let ids = vec!["D3".to_string(), "D1".to_string(), "D9".to_string()];
        let found = store.find_by_ids("devices", &ids, 10).await.unwrap();
        let keys: Vec<_> = found.iter().map(|d| d["id"].clone()).collect();
        assert_eq!(keys, vec![json!("D1"), json!("D3")]);
    }

    #[tokio::test]
    async fn test_operation_count() {
        let store = MemoryDocumentStore::new();
        assert_eq!(store.operation_count(), 0);
        store.find_one("devices", "D1").await.unwrap();
        store.find("devices", &Filter::all(), 1).await.unwrap();
        assert_eq!(store.operation_count(), 2);
    }

    #[test]
    fn test_merge_on_missing_document_writes_nothing() {
        let store = MemoryDocumentStore::new();
        let matched = tokio_test::block_on(store.merge(
            "devices",
            "D9",
            doc(json!({"status": "offline"})),
        ))
        .unwrap();

        assert!(!matched);
        assert_eq!(tokio_test::block_on(store.len("devices")), 0);
    }
}
