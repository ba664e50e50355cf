//! Contracts for entities persisted as documents in a keyed collection.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use super::patch::{self, FieldKind, PatchError};

/// An entity stored as an open JSON document under a caller-visible key.
///
/// The typed struct is a view over the stored document: serialization
/// produces the full formal field set, and deserialization ignores any extra
/// fields a partial update may have added.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the backing collection. Must be a plain identifier.
    const COLLECTION: &'static str;

    /// Name of the key field inside the document.
    const KEY_FIELD: &'static str = "id";

    /// The document key.
    fn key(&self) -> &str;
}

/// A document that accepts partial updates.
pub trait Patchable: Document {
    /// Formal schema, used to type-check partial updates.
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// Checks a partial update against the formal schema and normalizes
    /// timestamp values. Unknown field names pass through untouched.
    fn check_patch(fields: Map<String, Value>) -> Result<Map<String, Value>, PatchError> {
        patch::check_patch(Self::KEY_FIELD, Self::FIELDS, fields)
    }
}
