//! Shared API response types
//!
//! Every successful response is wrapped as `{"success": true, "data": ...}`.

use axum::Json;
use serde::Serialize;

use crate::models::PagedResult;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Page metadata attached to every listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: i64,
    pub items_per_page: u32,
}

impl<T> From<&PagedResult<T>> for Pagination {
    fn from(page: &PagedResult<T>) -> Self {
        Self {
            current_page: page.page,
            total_pages: page.total_pages(),
            total_items: page.total,
            items_per_page: page.per_page,
        }
    }
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
