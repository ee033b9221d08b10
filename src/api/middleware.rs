//! Shared API state and error rendering
//!
//! `AppState` carries the services every handler needs. `ApiError` is the
//! single error type handlers return; it renders as
//! `{"success": false, "error": {"code", "message"}}` with a status derived
//! from the code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::db::repositories::{
    SqlxArticleRepository, SqlxCollegeCourseRepository, SqlxCollegeRepository,
    SqlxContactRepository, SqlxContentRepository, SqlxCourseRepository, SqlxLeadRepository,
    SqlxReferenceRepository, SqlxSubscriptionRepository,
};
use crate::db::DynDatabasePool;
use crate::services::{
    ArticleService, CollegeService, ContactService, LeadService, SearchService,
    SubscriptionService,
};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub college_service: Arc<CollegeService>,
    pub search_service: Arc<SearchService>,
    pub lead_service: Arc<LeadService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub contact_service: Arc<ContactService>,
    pub article_service: Arc<ArticleService>,
}

impl AppState {
    /// Wire every repository and service onto one pool
    pub fn from_pool(pool: DynDatabasePool) -> Self {
        let colleges = SqlxCollegeRepository::boxed(pool.clone());
        let articles = SqlxArticleRepository::boxed(pool.clone());

        let college_service = CollegeService::new(
            colleges.clone(),
            SqlxCollegeCourseRepository::boxed(pool.clone()),
            SqlxContentRepository::boxed(pool.clone()),
            SqlxReferenceRepository::boxed(pool.clone()),
        );
        let search_service = SearchService::new(
            colleges,
            SqlxCourseRepository::boxed(pool.clone()),
            articles.clone(),
        );

        Self {
            college_service: Arc::new(college_service),
            search_service: Arc::new(search_service),
            lead_service: Arc::new(LeadService::new(SqlxLeadRepository::boxed(pool.clone()))),
            subscription_service: Arc::new(SubscriptionService::new(
                SqlxSubscriptionRepository::boxed(pool.clone()),
            )),
            contact_service: Arc::new(ContactService::new(SqlxContactRepository::boxed(
                pool.clone(),
            ))),
            article_service: Arc::new(ArticleService::new(articles)),
            pool,
        }
    }
}

/// Error response for API errors
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new("METHOD_NOT_ALLOWED", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new("SERVICE_UNAVAILABLE", message)
    }

    /// Log the full error chain and echo its outermost message
    pub fn internal(err: anyhow::Error) -> Self {
        tracing::error!("Request failed: {:#}", err);
        Self::internal_error(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "METHOD_NOT_ALLOWED" => StatusCode::METHOD_NOT_ALLOWED,
            "CONFLICT" => StatusCode::CONFLICT,
            "SERVICE_UNAVAILABLE" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::validation_error("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::method_not_allowed("x").status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::internal_error("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::service_unavailable("x").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ApiError::new("SOMETHING_ELSE", "x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_envelope_shape() {
        let json = serde_json::to_value(ApiError::not_found("College not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": {"code": "NOT_FOUND", "message": "College not found"}
            })
        );
    }

    #[test]
    fn test_internal_echoes_outer_context() {
        let err = anyhow::anyhow!("connection reset").context("Failed to list colleges");
        let api = ApiError::internal(err);
        assert_eq!(api.error.code, "INTERNAL_ERROR");
        assert_eq!(api.error.message, "Failed to list colleges");
    }
}
