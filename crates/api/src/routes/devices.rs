//! Device endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::device::{sector_filter, BulkDevicesRequest, DeviceListQuery};
use domain::models::{Device, Document, Patchable};
use persistence::store::DocumentMap;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ValidatedJson};
use crate::middleware::metrics::record_documents_upserted;

/// List devices, optionally restricted to one sector.
///
/// GET /api/devices?sector=<sector>
pub async fn list_devices(
    State(state): State<AppState>,
    Query(query): Query<DeviceListQuery>,
) -> Result<Json<Vec<Device>>, ApiError> {
    let devices = state.devices().list(&query.to_filter()).await?;
    Ok(Json(devices))
}

/// List devices in one sector. `all` is matched literally here.
///
/// GET /api/sectors/:sector/devices
pub async fn list_sector_devices(
    State(state): State<AppState>,
    Path(sector): Path<String>,
) -> Result<Json<Vec<Device>>, ApiError> {
    let devices = state.devices().list(&sector_filter(&sector)).await?;
    Ok(Json(devices))
}

/// Create or fully replace a device.
///
/// POST /api/devices
pub async fn upsert_device(
    State(state): State<AppState>,
    ValidatedJson(device): ValidatedJson<Device>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    let device = state.devices().upsert_one(device).await?;
    record_documents_upserted(Device::COLLECTION, 1);
    info!(device_id = %device.id, sector = %device.sector, "Device upserted");
    Ok((StatusCode::CREATED, Json(device)))
}

/// Upsert a batch of devices and return their stored state.
///
/// POST /api/devices/bulk
pub async fn upsert_devices_bulk(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BulkDevicesRequest>,
) -> Result<(StatusCode, Json<Vec<Device>>), ApiError> {
    let submitted = request.devices.len();
    let devices = state.devices().upsert_many(request.devices).await?;
    if submitted > 0 {
        record_documents_upserted(Device::COLLECTION, submitted);
        info!(submitted, stored = devices.len(), "Device batch upserted");
    }
    Ok((StatusCode::CREATED, Json(devices)))
}

/// GET /api/devices/:id
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Device>, ApiError> {
    Ok(Json(state.devices().get_by_id(&id).await?))
}

/// Merge the given fields into a stored device.
///
/// PATCH /api/devices/:id
pub async fn patch_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(fields): ApiJson<DocumentMap>,
) -> Result<Json<Device>, ApiError> {
    let fields = Device::check_patch(fields)?;
    let field_count = fields.len();
    let device = state.devices().patch_by_id(&id, fields).await?;
    info!(device_id = %id, field_count, "Device patched");
    Ok(Json(device))
}
