//! Field-equality filters for document listings.

use serde_json::{Map, Value};

/// Conjunction of equality predicates on top-level document fields.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Map<String, Value>,
}

impl Filter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter with a single equality predicate.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Predicates as a JSON object, suitable for containment queries.
    pub fn predicates(&self) -> &Map<String, Value> {
        &self.predicates
    }

    /// Whether `doc` satisfies every predicate.
    pub fn matches(&self, doc: &Map<String, Value>) -> bool {
        self.predicates
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}
