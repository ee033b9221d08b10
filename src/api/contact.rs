//! Contact-us form: POST /api/v1/contact-us

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::api::common::json_body;
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::ApiResponse;
use crate::models::{ContactMessage, CreateContactInput};
use crate::services::ContactServiceError;

impl From<ContactServiceError> for ApiError {
    fn from(err: ContactServiceError) -> Self {
        match err {
            ContactServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            ContactServiceError::InternalError(e) => ApiError::internal(e),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}

async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<CreateContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ContactMessage>>), ApiError> {
    let input = json_body(payload)?;
    let message = state.contact_service.submit(input).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(message)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::test_support;

    #[tokio::test]
    async fn test_submit() {
        let server = test_support::test_server(test_support::setup().await);

        let response = server
            .post("/api/v1/contact-us")
            .json(&json!({
                "name": "Tama",
                "email": "tama@example.com",
                "phn_no": "0499 000 000",
                "message": "Please call me about MBA intakes"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["message"], "Please call me about MBA intakes");
        assert_eq!(body["data"]["phn_no"], "0499 000 000");
    }

    #[tokio::test]
    async fn test_submit_missing_message() {
        let server = test_support::test_server(test_support::setup().await);
        let response = server
            .post("/api/v1/contact-us")
            .json(&json!({"name": "Tama", "email": "tama@example.com"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
