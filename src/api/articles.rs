//! Article endpoints
//!
//! - GET /api/v1/articles?silos&page&limit
//! - GET /api/v1/articles/{id}

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::{pagination, parse_id, query_params, PaginationQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{ApiResponse, Pagination};
use crate::models::Article;
use crate::services::ArticleServiceError;

impl From<ArticleServiceError> for ApiError {
    fn from(err: ArticleServiceError) -> Self {
        match err {
            ArticleServiceError::NotFound(_) => ApiError::not_found("Article not found"),
            ArticleServiceError::InvalidSilo(_) => ApiError::validation_error("Invalid silo specified"),
            ArticleServiceError::InternalError(e) => ApiError::internal(e),
        }
    }
}

/// Silo filter; pagination is decoded separately and leniently
#[derive(Debug, Default, Deserialize)]
pub struct ArticleFilterQuery {
    #[serde(default)]
    pub silos: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<Article>,
    pub pagination: Pagination,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_articles))
        .route("/{id}", get(get_article))
}

async fn list_articles(
    State(state): State<AppState>,
    filter: Result<Query<ArticleFilterQuery>, QueryRejection>,
    page: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ArticleListResponse>>, ApiError> {
    let filter = query_params(filter)?;
    let params = pagination(page);
    let page = state
        .article_service
        .list(filter.silos.as_deref(), &params)
        .await?;

    Ok(ApiResponse::ok(ArticleListResponse {
        pagination: Pagination::from(&page),
        articles: page.items,
    }))
}

async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Article>>, ApiError> {
    let id = parse_id(&id, "Invalid article ID")?;
    Ok(ApiResponse::ok(state.article_service.get(id).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::models::ArticleSilo;
    use crate::test_support;

    #[tokio::test]
    async fn test_list_and_filter() {
        let pool = test_support::setup().await;
        test_support::insert_article(&pool, "Budget 2024", "body", ArticleSilo::News, 0).await;
        test_support::insert_article(&pool, "PTE guide", "body", ArticleSilo::Exam, 5).await;
        let server = test_support::test_server(pool);

        let body: Value = server.get("/api/v1/articles").await.json();
        assert_eq!(body["data"]["articles"][0]["title"], "PTE guide");
        assert_eq!(body["data"]["pagination"]["totalItems"], 2);

        let body: Value = server
            .get("/api/v1/articles")
            .add_query_param("silos", "news")
            .add_query_param("limit", "1")
            .await
            .json();
        assert_eq!(body["data"]["articles"][0]["title"], "Budget 2024");
        assert_eq!(body["data"]["pagination"]["itemsPerPage"], 1);
    }

    #[tokio::test]
    async fn test_invalid_silo() {
        let server = test_support::test_server(test_support::setup().await);
        let response = server
            .get("/api/v1/articles")
            .add_query_param("silos", "rumours")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["message"], "Invalid silo specified");
    }

    #[tokio::test]
    async fn test_repeated_silo_is_rejected() {
        let server = test_support::test_server(test_support::setup().await);

        let response = server.get("/api/v1/articles?silos=news&silos=exam").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_page_keeps_silo_filter() {
        let pool = test_support::setup().await;
        test_support::insert_article(&pool, "Budget 2024", "body", ArticleSilo::News, 0).await;
        test_support::insert_article(&pool, "PTE guide", "body", ArticleSilo::Exam, 5).await;
        let server = test_support::test_server(pool);

        let response = server.get("/api/v1/articles?silos=news&page=abc").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["pagination"]["totalItems"], 1);
        assert_eq!(body["data"]["pagination"]["currentPage"], 1);
        assert_eq!(body["data"]["articles"][0]["title"], "Budget 2024");
    }

    #[tokio::test]
    async fn test_get_article() {
        let pool = test_support::setup().await;
        let id = test_support::insert_article(&pool, "Scholarships", "How to apply", ArticleSilo::Blog, 0).await;
        let server = test_support::test_server(pool);

        let body: Value = server.get(&format!("/api/v1/articles/{}", id)).await.json();
        assert_eq!(body["data"]["content"], "How to apply");

        server
            .get("/api/v1/articles/x1")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        let response = server.get("/api/v1/articles/404").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"]["message"], "Article not found");
    }
}
