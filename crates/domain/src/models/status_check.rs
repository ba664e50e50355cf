//! Status check domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_not_blank;
use uuid::Uuid;
use validator::Validate;

use super::document::Document;

/// Append-only liveness record left by a client.
///
/// Unlike devices and alerts, the server owns the key and the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    #[serde(with = "shared::timestamp::iso8601")]
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    /// Creates a new record with a fresh id, stamped now.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

impl Document for StatusCheck {
    const COLLECTION: &'static str = "status_checks";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Request payload for recording a status check.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStatusCheckRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub client_name: String,
}

impl From<CreateStatusCheckRequest> for StatusCheck {
    fn from(request: CreateStatusCheckRequest) -> Self {
        StatusCheck::new(request.client_name)
    }
}
