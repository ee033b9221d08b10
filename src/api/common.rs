//! Common API utilities and shared types

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use crate::api::middleware::ApiError;
use crate::models::{ListParams, DEFAULT_PER_PAGE};

/// Parse a path id; anything but a positive decimal integer is rejected
pub fn parse_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::validation_error(message));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::validation_error(message)),
    }
}

/// Pagination query parameters
///
/// Kept as raw strings so malformed values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl PaginationQuery {
    pub fn to_params(&self) -> ListParams {
        ListParams::new(
            lenient_u32(self.page.as_deref(), 1),
            lenient_u32(self.limit.as_deref(), DEFAULT_PER_PAGE),
        )
    }
}

/// Unwrap a query string, turning decode failures into validation errors
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::validation_error(rejection.body_text()))
}

/// Pagination from a query string, defaulting when it cannot be decoded
pub fn pagination(query: Result<Query<PaginationQuery>, QueryRejection>) -> ListParams {
    query
        .map(|Query(q)| q.to_params())
        .unwrap_or_default()
}

fn lenient_u32(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

/// Unwrap a JSON body, turning decode failures into validation errors
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::validation_error(rejection.body_text()))
}
