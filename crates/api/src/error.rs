use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::PatchError;
use persistence::store::StoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// One failed rule, addressed by its path in the payload.
#[derive(Debug)]
struct ValidationDetail {
    field: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service_unavailable",
                    msg.clone(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => {
                ApiError::NotFound(format!("{} '{}' not found", entity_label(collection), id))
            }
            StoreError::Duplicate { .. } => ApiError::Conflict(err.to_string()),
            StoreError::Unavailable(msg) => ApiError::ServiceUnavailable(msg),
            StoreError::Mapping(e) => ApiError::Internal(format!("Stored document mapping failed: {}", e)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PatchError> for ApiError {
    fn from(err: PatchError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = collect_details("", &errors)
            .into_iter()
            .map(|d| format!("{}: {}", d.field, d.message))
            .collect();
        // HashMap iteration order; sort for stable messages.
        details.sort();

        ApiError::Validation(details.join("; "))
    }
}

/// Flattens nested validation errors into `path.to.field` entries.
fn collect_details(prefix: &str, errors: &validator::ValidationErrors) -> Vec<ValidationDetail> {
    use validator::ValidationErrorsKind;

    let path = |field: &str| {
        if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        }
    };

    errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => errs
                .iter()
                .map(|e| ValidationDetail {
                    field: path(field),
                    message: e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
                .collect::<Vec<_>>(),
            ValidationErrorsKind::Struct(inner) => collect_details(&path(field), inner),
            ValidationErrorsKind::List(items) => items
                .iter()
                .flat_map(|(index, inner)| {
                    collect_details(&format!("{}[{}]", path(field), index), inner)
                })
                .collect(),
        })
        .collect()
}

fn entity_label(collection: &str) -> &'static str {
    match collection {
        "devices" => "Device",
        "alerts" => "Alert",
        "status_checks" => "Status check",
        _ => "Document",
    }
}
