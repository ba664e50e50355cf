//! Device domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_key;
use validator::Validate;

use super::document::{Document, Patchable};
use super::filter::Filter;
use super::patch::FieldKind;

/// Sentinel sector value meaning "no sector filter" in general listings.
pub const ALL_SECTORS: &str = "all";

/// Latest reported state of one monitored network device.
///
/// Used both as the request payload and the stored/returned shape: the
/// caller owns the key and every create fully replaces the stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[validate(custom(function = "validate_key"))]
    pub id: String,

    pub sector: String,
    pub location: String,
    pub rssi: f64,
    pub bandwidth: f64,
    pub clients: i64,
    pub error_rate: f64,
    pub temperature: f64,

    #[serde(default)]
    pub humidity: Option<f64>,

    pub status: String,

    #[serde(with = "shared::timestamp::iso8601")]
    pub last_seen: DateTime<Utc>,
}

impl Document for Device {
    const COLLECTION: &'static str = "devices";

    fn key(&self) -> &str {
        &self.id
    }
}

impl Patchable for Device {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("sector", FieldKind::Text),
        ("location", FieldKind::Text),
        ("rssi", FieldKind::Number),
        ("bandwidth", FieldKind::Number),
        ("clients", FieldKind::Integer),
        ("errorRate", FieldKind::Number),
        ("temperature", FieldKind::Number),
        ("humidity", FieldKind::OptionalNumber),
        ("status", FieldKind::Text),
        ("lastSeen", FieldKind::Timestamp),
    ];
}

/// Request payload for bulk device upserts.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BulkDevicesRequest {
    #[serde(default)]
    #[validate(nested)]
    pub devices: Vec<Device>,
}

/// Query parameters for the general device listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceListQuery {
    pub sector: Option<String>,
}

impl DeviceListQuery {
    /// Omitted, empty and `"all"` sectors mean no filter.
    pub fn to_filter(&self) -> Filter {
        match self.sector.as_deref() {
            None | Some("") | Some(ALL_SECTORS) => Filter::all(),
            Some(sector) => sector_filter(sector),
        }
    }
}

/// Literal sector filter, used by the path-scoped listing.
pub fn sector_filter(sector: &str) -> Filter {
    Filter::eq("sector", sector)
}
