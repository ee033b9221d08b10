//! API layer - HTTP handlers and routing
//!
//! Everything lives under `/api/v1` except `/health`:
//! - College listing, ranking and detail endpoints
//! - Global search
//! - Lead forms (CRUD)
//! - Newsletter subscriptions and contact-us messages
//! - Articles

pub mod articles;
pub mod colleges;
pub mod common;
pub mod contact;
pub mod health;
pub mod leads;
pub mod middleware;
pub mod responses;
pub mod search;
pub mod subscriptions;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use middleware::{ApiError, AppState};
pub use responses::{ApiResponse, Pagination};

/// Build the `/api/v1` router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .nest("/college", colleges::router())
        .nest("/search", search::router())
        .nest("/leads", leads::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/contact-us", contact::router())
        .nest("/articles", articles::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", build_api_router())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(middleware)
        .with_state(state)
}

/// CORS for the configured origin; `*` allows any origin
pub fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        match origin.trim().parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin {:?}, allowing any origin", origin);
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}
