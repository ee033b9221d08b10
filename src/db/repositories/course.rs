//! Course repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::like_pattern;
use crate::db::{Backend, DynDatabasePool};
use crate::models::CourseSearchHit;

const SEARCH_SQL: &str = r#"
    SELECT id, course_name, duration_in_months, rating, score
    FROM courses
    WHERE LOWER(course_name) LIKE LOWER(?) ESCAPE '!'
    ORDER BY score DESC, id ASC
    LIMIT ?
"#;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Courses whose name contains `query`, case-insensitively
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<CourseSearchHit>>;
}

pub struct SqlxCourseRepository {
    pool: DynDatabasePool,
}

impl SqlxCourseRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CourseRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CourseRepository for SqlxCourseRepository {
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<CourseSearchHit>> {
        let pattern = like_pattern(query);
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, CourseSearchHit>(SEARCH_SQL)
                    .bind(&pattern)
                    .bind(limit)
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, CourseSearchHit>(SEARCH_SQL)
                    .bind(&pattern)
                    .bind(limit)
                    .fetch_all(p)
                    .await
            }
        }
        .context("Failed to search courses")
    }
}
