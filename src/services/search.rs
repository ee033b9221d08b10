//! Global search across colleges, courses and articles

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::db::repositories::{ArticleRepository, CollegeRepository, CourseRepository};
use crate::models::{ArticleSearchHit, CollegeSearchHit, CourseSearchHit};

/// Hits returned per entity kind
pub const SEARCH_LIMIT: i64 = 3;

#[derive(Debug, Error)]
pub enum SearchServiceError {
    #[error("Search query is required")]
    EmptyQuery,

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub colleges: Vec<CollegeSearchHit>,
    pub courses: Vec<CourseSearchHit>,
    pub articles: Vec<ArticleSearchHit>,
}

pub struct SearchService {
    colleges: Arc<dyn CollegeRepository>,
    courses: Arc<dyn CourseRepository>,
    articles: Arc<dyn ArticleRepository>,
}

impl SearchService {
    pub fn new(
        colleges: Arc<dyn CollegeRepository>,
        courses: Arc<dyn CourseRepository>,
        articles: Arc<dyn ArticleRepository>,
    ) -> Self {
        Self {
            colleges,
            courses,
            articles,
        }
    }

    pub async fn search(&self, query: Option<&str>) -> Result<SearchResults, SearchServiceError> {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(SearchServiceError::EmptyQuery)?;

        let (colleges, courses, articles) = tokio::try_join!(
            self.colleges.search(query, SEARCH_LIMIT),
            self.courses.search(query, SEARCH_LIMIT),
            self.articles.search(query, SEARCH_LIMIT),
        )?;

        tracing::debug!(
            query,
            colleges = colleges.len(),
            courses = courses.len(),
            articles = articles.len(),
            "Search completed"
        );

        Ok(SearchResults {
            colleges,
            courses,
            articles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        SqlxArticleRepository, SqlxCollegeRepository, SqlxCourseRepository,
    };
    use crate::db::DynDatabasePool;
    use crate::models::ArticleSilo;
    use crate::test_support::{self, CollegeSeed};

    fn service(pool: &DynDatabasePool) -> SearchService {
        SearchService::new(
            SqlxCollegeRepository::boxed(pool.clone()),
            SqlxCourseRepository::boxed(pool.clone()),
            SqlxArticleRepository::boxed(pool.clone()),
        )
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let pool = test_support::setup().await;
        let svc = service(&pool);
        assert!(matches!(svc.search(None).await, Err(SearchServiceError::EmptyQuery)));
        assert!(matches!(svc.search(Some("   ")).await, Err(SearchServiceError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_search_spans_all_entities() {
        let pool = test_support::setup().await;
        test_support::insert_college(&pool, &CollegeSeed::named("Global Business Institute", 5)).await;
        test_support::insert_course(&pool, "Master of Business Administration", 8).await;
        test_support::insert_article(&pool, "Why study business?", "Reasons", ArticleSilo::Blog, 0).await;
        test_support::insert_article(&pool, "Nursing intake", "Dates", ArticleSilo::News, 0).await;

        let results = service(&pool).search(Some(" business ")).await.unwrap();
        assert_eq!(results.colleges.len(), 1);
        assert_eq!(results.courses.len(), 1);
        assert_eq!(results.articles.len(), 1);
        assert_eq!(results.articles[0].title, "Why study business?");
    }

    #[tokio::test]
    async fn test_each_kind_is_capped() {
        let pool = test_support::setup().await;
        for i in 0..5 {
            test_support::insert_college(&pool, &CollegeSeed::named(&format!("Tech {}", i), i)).await;
            test_support::insert_course(&pool, &format!("Tech course {}", i), i).await;
        }

        let results = service(&pool).search(Some("tech")).await.unwrap();
        assert_eq!(results.colleges.len(), 3);
        assert_eq!(results.courses.len(), 3);
        assert!(results.articles.is_empty());
    }
}
