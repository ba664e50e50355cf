//! Alert domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_key, validate_not_blank};
use validator::Validate;

use super::document::Document;
use super::filter::Filter;

/// A point-in-time notification raised for a device.
///
/// `device_id` refers to a [`Device`](super::Device) key but is advisory:
/// alerts may arrive before, or without, the device they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[validate(custom(function = "validate_key"))]
    pub id: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub device_id: String,

    pub severity: String,
    pub message: String,

    #[serde(with = "shared::timestamp::iso8601")]
    pub timestamp: DateTime<Utc>,
}

impl Document for Alert {
    const COLLECTION: &'static str = "alerts";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Request payload for bulk alert upserts.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BulkAlertsRequest {
    #[serde(default)]
    #[validate(nested)]
    pub alerts: Vec<Alert>,
}

/// Query parameters for alert listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListQuery {
    pub device_id: Option<String>,
}

impl AlertListQuery {
    pub fn to_filter(&self) -> Filter {
        match self.device_id.as_deref() {
            None | Some("") => Filter::all(),
            Some(device_id) => Filter::eq("deviceId", device_id),
        }
    }
}
