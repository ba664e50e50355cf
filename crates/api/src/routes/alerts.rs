//! Alert endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use domain::models::alert::{AlertListQuery, BulkAlertsRequest};
use domain::models::{Alert, Document};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::middleware::metrics::record_documents_upserted;

/// List alerts, optionally for one device.
///
/// GET /api/alerts?deviceId=<id>
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertListQuery>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = state.alerts().list(&query.to_filter()).await?;
    Ok(Json(alerts))
}

/// Create or fully replace an alert.
///
/// POST /api/alerts
pub async fn upsert_alert(
    State(state): State<AppState>,
    ValidatedJson(alert): ValidatedJson<Alert>,
) -> Result<(StatusCode, Json<Alert>), ApiError> {
    let alert = state.alerts().upsert_one(alert).await?;
    record_documents_upserted(Alert::COLLECTION, 1);
    info!(alert_id = %alert.id, device_id = %alert.device_id, severity = %alert.severity, "Alert upserted");
    Ok((StatusCode::CREATED, Json(alert)))
}

/// POST /api/alerts/bulk
pub async fn upsert_alerts_bulk(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BulkAlertsRequest>,
) -> Result<(StatusCode, Json<Vec<Alert>>), ApiError> {
    let submitted = request.alerts.len();
    let alerts = state.alerts().upsert_many(request.alerts).await?;
    if submitted > 0 {
        record_documents_upserted(Alert::COLLECTION, submitted);
        info!(submitted, stored = alerts.len(), "Alert batch upserted");
    }
    Ok((StatusCode::CREATED, Json(alerts)))
}
