//! College repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::like_pattern;
use crate::db::{Backend, DynDatabasePool};
use crate::models::{College, CollegeSearchHit, CollegeSummary, ListParams, TopCollege};

const COLLEGE_COLUMNS: &str = "id, college_name, location, established, email, contact, logo_url, \
     bg_url, media_url, rating, score, intake_start_date, pr_pathway, slug, total_students, \
     acceptance_rate, international_student_rate, brochure_url, avg_fees_in_aud, stream_id, \
     city_id, state_id, country_id, meta_desc, og_img, created_at, updated_at";

const TOP_SQL: &str = r#"
    SELECT c.id, c.college_name, c.logo_url, c.location, c.intake_start_date, c.pr_pathway, c.slug,
           (SELECT COUNT(*) FROM college_courses cc WHERE cc.college_id = c.id) AS count_collegewise_course
    FROM colleges c
    WHERE (? IS NULL OR c.stream_id = ?)
    ORDER BY c.score DESC, c.id ASC
    LIMIT ?
"#;

const SUMMARY_SQL: &str = r#"
    SELECT c.id, c.slug, c.logo_url, c.college_name, c.location, c.rating, c.score,
           c.brochure_url, c.avg_fees_in_aud,
           ci.name AS city_name, st.name AS state_name,
           (SELECT COUNT(*) FROM college_courses cc WHERE cc.college_id = c.id) AS course_count
    FROM colleges c
    LEFT JOIN cities ci ON ci.id = c.city_id
    LEFT JOIN states st ON st.id = c.state_id
    ORDER BY c.score DESC, c.id ASC
    LIMIT ? OFFSET ?
"#;

const SEARCH_SQL: &str = r#"
    SELECT c.id, c.college_name, c.location, c.logo_url, c.rating, c.score,
           s.name AS primary_stream, c.slug
    FROM colleges c
    LEFT JOIN streams s ON s.id = c.stream_id
    WHERE LOWER(c.college_name) LIKE LOWER(?) ESCAPE '!'
       OR LOWER(c.location) LIKE LOWER(?) ESCAPE '!'
    ORDER BY c.score DESC, c.id ASC
    LIMIT ?
"#;

const COUNT_SQL: &str = "SELECT COUNT(*) FROM colleges";

const COURSE_COUNT_SQL: &str = "SELECT COUNT(*) FROM college_courses WHERE college_id = ?";

#[async_trait]
pub trait CollegeRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<College>>;
    /// Highest scoring colleges, optionally restricted to one stream
    async fn list_top(&self, stream_id: Option<i64>, limit: i64) -> Result<Vec<TopCollege>>;
    /// One page of listing rows ordered by score
    async fn list_summaries(&self, params: &ListParams) -> Result<Vec<CollegeSummary>>;
    async fn count(&self) -> Result<i64>;
    /// Number of course offerings attached to a college
    async fn course_count(&self, college_id: i64) -> Result<i64>;
    /// Colleges whose name or location contains `query`, case-insensitively
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<CollegeSearchHit>>;
}

pub struct SqlxCollegeRepository {
    pool: DynDatabasePool,
}

impl SqlxCollegeRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CollegeRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CollegeRepository for SqlxCollegeRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<College>> {
        let sql = format!("SELECT {} FROM colleges WHERE id = ?", COLLEGE_COLUMNS);
        match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_as::<_, College>(&sql).bind(id).fetch_optional(p).await,
            Backend::Mysql(p) => sqlx::query_as::<_, College>(&sql).bind(id).fetch_optional(p).await,
        }
        .context("Failed to get college")
    }

    async fn list_top(&self, stream_id: Option<i64>, limit: i64) -> Result<Vec<TopCollege>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, TopCollege>(TOP_SQL)
                    .bind(stream_id)
                    .bind(stream_id)
                    .bind(limit)
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, TopCollege>(TOP_SQL)
                    .bind(stream_id)
                    .bind(stream_id)
                    .bind(limit)
                    .fetch_all(p)
                    .await
            }
        }
        .context("Failed to list top colleges")
    }

    async fn list_summaries(&self, params: &ListParams) -> Result<Vec<CollegeSummary>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, CollegeSummary>(SUMMARY_SQL)
                    .bind(params.limit())
                    .bind(params.offset())
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, CollegeSummary>(SUMMARY_SQL)
                    .bind(params.limit())
                    .bind(params.offset())
                    .fetch_all(p)
                    .await
            }
        }
        .context("Failed to list colleges")
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_scalar::<_, i64>(COUNT_SQL).fetch_one(p).await,
            Backend::Mysql(p) => sqlx::query_scalar::<_, i64>(COUNT_SQL).fetch_one(p).await,
        }
        .context("Failed to count colleges")
    }

    async fn course_count(&self, college_id: i64) -> Result<i64> {
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_scalar::<_, i64>(COURSE_COUNT_SQL)
                    .bind(college_id)
                    .fetch_one(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_scalar::<_, i64>(COURSE_COUNT_SQL)
                    .bind(college_id)
                    .fetch_one(p)
                    .await
            }
        }
        .context("Failed to count college courses")
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<CollegeSearchHit>> {
        let pattern = like_pattern(query);
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, CollegeSearchHit>(SEARCH_SQL)
                    .bind(&pattern)
                    .bind(&pattern)
                    .bind(limit)
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, CollegeSearchHit>(SEARCH_SQL)
                    .bind(&pattern)
                    .bind(&pattern)
                    .bind(limit)
                    .fetch_all(p)
                    .await
            }
        }
        .context("Failed to search colleges")
    }
}
