//! Status check endpoint handlers.

use axum::{extract::State, Json};
use domain::models::status_check::CreateStatusCheckRequest;
use domain::models::StatusCheck;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;

/// Record a status check. The id and timestamp are generated here.
///
/// POST /api/status
pub async fn create_status_check(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateStatusCheckRequest>,
) -> Result<Json<StatusCheck>, ApiError> {
    let check = state.status_checks().create(request.into()).await?;
    info!(id = %check.id, client_name = %check.client_name, "Status check recorded");
    Ok(Json(check))
}

/// List recorded status checks.
///
/// GET /api/status
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    Ok(Json(state.status_checks().list().await?))
}
