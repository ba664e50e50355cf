//! Partial-update checking.

use serde_json::{Map, Value};
use shared::timestamp::{format_timestamp, parse_timestamp};
use thiserror::Error;

/// Semantic type of a formal document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Timestamp,
    OptionalNumber,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Number => "a number",
            FieldKind::Integer => "an integer",
            FieldKind::Timestamp => "an ISO-8601 timestamp",
            FieldKind::OptionalNumber => "a number or null",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("Field '{0}' is the document key and cannot be changed")]
    ImmutableKey(String),

    #[error("Field '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

/// Checks `fields` against `schema`, returning the patch with timestamp
/// values rewritten to their canonical wire form.
pub fn check_patch(
    key_field: &str,
    schema: &[(&str, FieldKind)],
    mut fields: Map<String, Value>,
) -> Result<Map<String, Value>, PatchError> {
    if fields.contains_key(key_field) {
        return Err(PatchError::ImmutableKey(key_field.to_string()));
    }

    for (name, kind) in schema {
        let Some(value) = fields.get_mut(*name) else {
            continue;
        };

        let ok = match kind {
            FieldKind::Text => value.is_string(),
            FieldKind::Number => value.is_number(),
            // Stored integers are read back as i64.
            FieldKind::Integer => value.is_i64(),
            FieldKind::OptionalNumber => value.is_number() || value.is_null(),
            FieldKind::Timestamp => match value.as_str().map(parse_timestamp) {
                Some(Ok(ts)) => {
                    *value = Value::String(format_timestamp(&ts));
                    true
                }
                _ => false,
            },
        };

        if !ok {
            return Err(PatchError::WrongType {
                field: name.to_string(),
                expected: kind.describe(),
            });
        }
    }

    Ok(fields)
}
