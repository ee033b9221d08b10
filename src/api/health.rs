//! Liveness endpoint: GET /health

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: String,
}

/// Ping the database; 503 when it does not answer
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthStatus>>, ApiError> {
    if let Err(e) = state.pool.ping().await {
        tracing::warn!("Health check failed: {:#}", e);
        return Err(ApiError::service_unavailable("Database unavailable"));
    }

    Ok(ApiResponse::ok(HealthStatus {
        status: "ok",
        database: state.pool.driver().to_string(),
    }))
}
