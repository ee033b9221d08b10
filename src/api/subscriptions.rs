//! Newsletter subscriptions: POST /api/v1/subscriptions

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::api::common::json_body;
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::ApiResponse;
use crate::models::{CreateSubscriptionInput, Subscription};
use crate::services::SubscriptionServiceError;

impl From<SubscriptionServiceError> for ApiError {
    fn from(err: SubscriptionServiceError) -> Self {
        match err {
            SubscriptionServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            SubscriptionServiceError::AlreadySubscribed(_) => {
                ApiError::conflict("Email is already subscribed")
            }
            SubscriptionServiceError::InternalError(e) => ApiError::internal(e),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(subscribe))
}

async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubscriptionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Subscription>>), ApiError> {
    let input = json_body(payload)?;
    let subscription = state.subscription_service.subscribe(input).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(subscription)))
}
