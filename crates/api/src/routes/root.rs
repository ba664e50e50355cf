use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// GET /api/
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello World".to_string(),
    })
}
