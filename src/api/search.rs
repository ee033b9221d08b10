//! Global search endpoint: GET /api/v1/search?q=

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::common::query_params;
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::ApiResponse;
use crate::services::{SearchResults, SearchServiceError};

impl From<SearchServiceError> for ApiError {
    fn from(err: SearchServiceError) -> Self {
        match err {
            SearchServiceError::EmptyQuery => ApiError::validation_error("Search query is required"),
            SearchServiceError::InternalError(e) => ApiError::internal(e),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<SearchResults>>, ApiError> {
    let query = query_params(query)?;
    let results = state.search_service.search(query.q.as_deref()).await?;
    Ok(ApiResponse::ok(results))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::models::{ArticleSilo, ReferenceKind};
    use crate::test_support::{self, CollegeSeed};

    #[tokio::test]
    async fn test_missing_query() {
        let server = test_support::test_server(test_support::setup().await);

        for response in [
            server.get("/api/v1/search").await,
            server.get("/api/v1/search").add_query_param("q", "").await,
        ] {
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: Value = response.json();
            assert_eq!(body["error"]["message"], "Search query is required");
        }
    }

    #[tokio::test]
    async fn test_undecodable_query_uses_error_envelope() {
        let server = test_support::test_server(test_support::setup().await);

        let response = server.get("/api/v1/search?q=a&q=b").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_search_results_shape() {
        let pool = test_support::setup().await;
        let stream = test_support::insert_reference(&pool, ReferenceKind::Stream, "Health").await;
        test_support::insert_college(&pool, &CollegeSeed::named("Coastal Health Campus", 30).stream(stream)).await;
        test_support::insert_course(&pool, "Diploma of Health Science", 4).await;
        test_support::insert_article(&pool, "Health careers", "Jobs in health", ArticleSilo::Course, 0).await;
        let server = test_support::test_server(pool);

        let response = server.get("/api/v1/search").add_query_param("q", "health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        let data = &body["data"];

        assert_eq!(data["colleges"][0]["primary_stream"], "Health");
        assert_eq!(data["colleges"][0]["slug"], "coastal-health-campus");
        assert_eq!(data["courses"][0]["duration_in_months"], 24);
        assert_eq!(data["articles"][0]["silos"], "course");
        assert!(data["articles"][0]["created_at"].is_string());
        assert!(data["articles"][0].get("content").is_none());
    }
}
