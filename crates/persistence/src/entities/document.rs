//! Document entity (database row mapping).

use sqlx::types::Json;
use sqlx::FromRow;

use crate::store::DocumentMap;

/// Database row mapping shared by every document collection table.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentEntity {
    pub id: String,
    pub doc: Json<DocumentMap>,
}

impl From<DocumentEntity> for DocumentMap {
    fn from(entity: DocumentEntity) -> Self {
        entity.doc.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_entity_into_map() {
        let doc = json!({"id": "D1", "sector": "edu"}).as_object().cloned().unwrap();
        let entity = DocumentEntity {
            id: "D1".to_string(),
            doc: Json(doc.clone()),
        };
        let map: DocumentMap = entity.into();
        assert_eq!(map, doc);
    }

    #[test]
    fn test_document_entity_debug() {
        let entity = DocumentEntity {
            id: "A1".to_string(),
            doc: Json(DocumentMap::new()),
        };
        assert!(format!("{:?}", entity).contains("A1"));
    }
}
