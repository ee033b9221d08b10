//! Lead form endpoints
//!
//! - POST   /api/v1/leads
//! - GET    /api/v1/leads?page&limit
//! - GET    /api/v1/leads/view/{id}
//! - PUT    /api/v1/leads/view/{id}
//! - DELETE /api/v1/leads/view/{id}

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::common::{json_body, pagination, parse_id, PaginationQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{ApiResponse, MessageResponse, Pagination};
use crate::models::{CreateLeadInput, LeadForm, UpdateLeadInput};
use crate::services::LeadServiceError;

const INVALID_LEAD_ID: &str = "Invalid ID format";

impl From<LeadServiceError> for ApiError {
    fn from(err: LeadServiceError) -> Self {
        match err {
            LeadServiceError::NotFound(_) => ApiError::not_found("Lead form not found"),
            LeadServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            LeadServiceError::InternalError(e) => ApiError::internal(e),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeadListResponse {
    pub leads: Vec<LeadForm>,
    pub pagination: Pagination,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leads).post(create_lead))
        .route("/view/{id}", get(get_lead).put(update_lead).delete(delete_lead))
}

/// POST /api/v1/leads
async fn create_lead(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeadInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<LeadForm>>), ApiError> {
    let input = json_body(payload)?;
    let lead = state.lead_service.create(input).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(lead)))
}

/// GET /api/v1/leads - Newest first
async fn list_leads(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<LeadListResponse>>, ApiError> {
    let params = pagination(query);
    let page = state.lead_service.list(&params).await?;

    Ok(ApiResponse::ok(LeadListResponse {
        pagination: Pagination::from(&page),
        leads: page.items,
    }))
}

async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LeadForm>>, ApiError> {
    let id = parse_id(&id, INVALID_LEAD_ID)?;
    Ok(ApiResponse::ok(state.lead_service.get(id).await?))
}

/// PUT /api/v1/leads/view/{id} - Partial update
async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateLeadInput>, JsonRejection>,
) -> Result<Json<ApiResponse<LeadForm>>, ApiError> {
    let id = parse_id(&id, INVALID_LEAD_ID)?;
    let input = json_body(payload)?;
    Ok(ApiResponse::ok(state.lead_service.update(id, input).await?))
}

async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_id(&id, INVALID_LEAD_ID)?;
    state.lead_service.delete(id).await?;
    Ok(ApiResponse::ok(MessageResponse::new("Lead form deleted successfully")))
}
