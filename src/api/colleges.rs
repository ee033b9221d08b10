//! College API endpoints
//!
//! - GET /api/v1/college/top?stream=
//! - GET /api/v1/college/list?page&limit
//! - GET /api/v1/college/info/{id}
//! - GET /api/v1/college/courses/{id}
//! - GET /api/v1/college/fees/{id}
//! - GET /api/v1/college/faqs/{id}

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::{pagination, parse_id, query_params, PaginationQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{ApiResponse, Pagination};
use crate::models::{
    CollegeCourses, CollegeFaqs, CollegeFees, CollegeFilters, CollegeInfo, CollegeSummary,
    TopCollege,
};
use crate::services::CollegeServiceError;

const INVALID_COLLEGE_ID: &str = "Invalid college ID";

impl From<CollegeServiceError> for ApiError {
    fn from(err: CollegeServiceError) -> Self {
        match err {
            CollegeServiceError::NotFound(_) => ApiError::not_found("College not found"),
            CollegeServiceError::InvalidStream(_) => {
                ApiError::validation_error("Invalid stream specified")
            }
            CollegeServiceError::InternalError(e) => ApiError::internal(e),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TopCollegesQuery {
    #[serde(default)]
    pub stream: Option<String>,
}

/// Body of the listing response
#[derive(Debug, Serialize)]
pub struct CollegeListResponse {
    pub colleges: Vec<CollegeSummary>,
    pub pagination: Pagination,
    pub filters: CollegeFilters,
}

/// Build the college router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/top", get(top_colleges))
        .route("/list", get(list_colleges))
        .route("/info/{id}", get(college_info))
        .route("/courses/{id}", get(college_courses))
        .route("/fees/{id}", get(college_fees))
        .route("/faqs/{id}", get(college_faqs))
}

/// GET /api/v1/college/top - Six highest scoring colleges
async fn top_colleges(
    State(state): State<AppState>,
    query: Result<Query<TopCollegesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<TopCollege>>>, ApiError> {
    let query = query_params(query)?;
    let colleges = state.college_service.top(query.stream.as_deref()).await?;
    Ok(ApiResponse::ok(colleges))
}

/// GET /api/v1/college/list - Paginated listing with filter facets
///
/// Failures here are reported with a generic message.
async fn list_colleges(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<CollegeListResponse>>, ApiError> {
    let params = pagination(query);
    let listing = state.college_service.list(&params).await.map_err(|e| {
        tracing::error!("Failed to fetch college list: {}", e);
        ApiError::internal_error("Internal server error")
    })?;

    Ok(ApiResponse::ok(CollegeListResponse {
        pagination: Pagination::from(&listing.page),
        colleges: listing.page.items,
        filters: listing.filters,
    }))
}

/// GET /api/v1/college/info/{id}
async fn college_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CollegeInfo>>, ApiError> {
    let id = parse_id(&id, INVALID_COLLEGE_ID)?;
    Ok(ApiResponse::ok(state.college_service.info(id).await?))
}

/// GET /api/v1/college/courses/{id}
async fn college_courses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CollegeCourses>>, ApiError> {
    let id = parse_id(&id, INVALID_COLLEGE_ID)?;
    Ok(ApiResponse::ok(state.college_service.courses(id).await?))
}

/// GET /api/v1/college/fees/{id}
async fn college_fees(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CollegeFees>>, ApiError> {
    let id = parse_id(&id, INVALID_COLLEGE_ID)?;
    Ok(ApiResponse::ok(state.college_service.fees(id).await?))
}

/// GET /api/v1/college/faqs/{id}
async fn college_faqs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CollegeFaqs>>, ApiError> {
    let id = parse_id(&id, INVALID_COLLEGE_ID)?;
    Ok(ApiResponse::ok(state.college_service.faqs(id).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::models::{ContentSilo, ReferenceKind};
    use crate::test_support::{self, CollegeSeed};

    #[tokio::test]
    async fn test_top_colleges() {
        let pool = test_support::setup().await;
        let law = test_support::insert_reference(&pool, ReferenceKind::Stream, "Law").await;
        let id = test_support::insert_college(&pool, &CollegeSeed::named("Bench College", 70).stream(law)).await;
        let course = test_support::insert_course(&pool, "LLB", 1).await;
        test_support::insert_college_course(&pool, id, course, "LLB", 1.0).await;
        let server = test_support::test_server(pool);

        let response = server.get("/api/v1/college/top").add_query_param("stream", "LAW").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"][0]["college_name"], "Bench College");
        assert_eq!(body["data"][0]["count_collegewise_course"], 1);
        assert_eq!(body["data"][0]["pr_pathway"], true);
    }

    #[tokio::test]
    async fn test_top_colleges_unknown_stream() {
        let server = test_support::test_server(test_support::setup().await);

        let response = server.get("/api/v1/college/top").add_query_param("stream", "Wizardry").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Invalid stream specified");
    }

    #[tokio::test]
    async fn test_top_colleges_repeated_stream() {
        let server = test_support::test_server(test_support::setup().await);

        let response = server.get("/api/v1/college/top?stream=Law&stream=Art").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_shape() {
        let pool = test_support::setup().await;
        let city = test_support::insert_reference(&pool, ReferenceKind::City, "Hobart").await;
        for i in 0..3 {
            test_support::insert_college(&pool, &CollegeSeed::named(&format!("Isle {}", i), i).city(city)).await;
        }
        let server = test_support::test_server(pool);

        let response = server
            .get("/api/v1/college/list")
            .add_query_param("page", "2")
            .add_query_param("limit", "2")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();

        assert_eq!(body["data"]["colleges"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["colleges"][0]["city_name"], "Hobart");
        assert_eq!(body["data"]["colleges"][0]["course_count"], 0);
        assert_eq!(
            body["data"]["pagination"],
            serde_json::json!({"currentPage": 2, "totalPages": 2, "totalItems": 3, "itemsPerPage": 2})
        );
        assert_eq!(body["data"]["filters"]["city"], serde_json::json!(["Hobart"]));
        assert_eq!(body["data"]["filters"]["stream"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_list_malformed_pagination_defaults() {
        let server = test_support::test_server(test_support::setup().await);

        let response = server
            .get("/api/v1/college/list")
            .add_query_param("page", "abc")
            .add_query_param("limit", "-3")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["pagination"]["currentPage"], 1);
        assert_eq!(body["data"]["pagination"]["itemsPerPage"], 10);
        assert_eq!(body["data"]["pagination"]["totalPages"], 0);
    }

    #[tokio::test]
    async fn test_info() {
        let pool = test_support::setup().await;
        let id = test_support::insert_college(&pool, &CollegeSeed::named("Info College", 10)).await;
        test_support::insert_content(&pool, id, ContentSilo::Info, "Overview", 0).await;
        let server = test_support::test_server(pool);

        let response = server.get(&format!("/api/v1/college/info/{}", id)).await;
        response.assert_status_ok();
        let body: Value = response.json();
        let basic = &body["data"]["basic"];
        assert_eq!(basic["id"], id);
        assert_eq!(basic["college_name"], "Info College");
        assert_eq!(basic["course_count"], 0);
        assert_eq!(basic["info_content"][0]["silos"], "info");
        assert_eq!(basic["media_url"]["gallery"][0], "campus.jpg");
    }

    #[tokio::test]
    async fn test_courses_and_fees() {
        let pool = test_support::setup().await;
        let id = test_support::insert_college(&pool, &CollegeSeed::named("Fee College", 10)).await;
        let course = test_support::insert_course(&pool, "Design", 1).await;
        test_support::insert_college_course(&pool, id, course, "BDes", 25000.0).await;
        let server = test_support::test_server(pool);

        let body: Value = server.get(&format!("/api/v1/college/courses/{}", id)).await.json();
        assert_eq!(body["data"]["course_count"], 1);
        assert_eq!(body["data"]["courses"][0]["name"], "BDes");
        assert_eq!(body["data"]["course_content"], serde_json::json!([]));

        let body: Value = server.get(&format!("/api/v1/college/fees/{}", id)).await.json();
        assert_eq!(body["data"]["basic"]["id"], id);
        assert_eq!(body["data"]["fees"][0]["tuition_fees"], 25000.0);
        assert_eq!(body["data"]["fees"][0]["other_fees"]["application"], 100);
    }

    #[tokio::test]
    async fn test_faqs_null_when_absent() {
        let pool = test_support::setup().await;
        let id = test_support::insert_college(&pool, &CollegeSeed::named("No Faq", 10)).await;
        let server = test_support::test_server(pool);

        let response = server.get(&format!("/api/v1/college/faqs/{}", id)).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["data"]["faq"].is_null());
    }

    #[tokio::test]
    async fn test_detail_errors() {
        let server = test_support::test_server(test_support::setup().await);

        for path in ["info", "courses", "fees", "faqs"] {
            let response = server.get(&format!("/api/v1/college/{}/abc", path)).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: Value = response.json();
            assert_eq!(body["error"]["message"], "Invalid college ID");

            let response = server.get(&format!("/api/v1/college/{}/0", path)).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let response = server.get(&format!("/api/v1/college/{}/999", path)).await;
            response.assert_status(StatusCode::NOT_FOUND);
            let body: Value = response.json();
            assert_eq!(body["error"]["code"], "NOT_FOUND");
            assert_eq!(body["error"]["message"], "College not found");
        }
    }
}
