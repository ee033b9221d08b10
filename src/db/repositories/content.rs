//! Collegewise content repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::db::{Backend, DynDatabasePool};
use crate::models::{CollegeContent, ContentSilo};

const LIST_SQL: &str = r#"
    SELECT id, title, content, silos, college_id, meta_desc, og_img, created_at, updated_at
    FROM collegewise_content
    WHERE college_id = ? AND silos = ?
    ORDER BY id ASC
"#;

const LATEST_SQL: &str = r#"
    SELECT id, title, content, silos, college_id, meta_desc, og_img, created_at, updated_at
    FROM collegewise_content
    WHERE college_id = ? AND silos = ?
    ORDER BY updated_at DESC, id DESC
    LIMIT 1
"#;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// All content rows of one silo for a college
    async fn list_by_college(&self, college_id: i64, silo: ContentSilo) -> Result<Vec<CollegeContent>>;
    /// Most recently updated content row of one silo for a college
    async fn latest_by_college(&self, college_id: i64, silo: ContentSilo) -> Result<Option<CollegeContent>>;
}

pub struct SqlxContentRepository {
    pool: DynDatabasePool,
}

impl SqlxContentRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ContentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ContentRepository for SqlxContentRepository {
    async fn list_by_college(&self, college_id: i64, silo: ContentSilo) -> Result<Vec<CollegeContent>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, CollegeContent>(LIST_SQL)
                    .bind(college_id)
                    .bind(silo.as_str())
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, CollegeContent>(LIST_SQL)
                    .bind(college_id)
                    .bind(silo.as_str())
                    .fetch_all(p)
                    .await
            }
        }
        .with_context(|| format!("Failed to list {} content", silo))
    }

    async fn latest_by_college(&self, college_id: i64, silo: ContentSilo) -> Result<Option<CollegeContent>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, CollegeContent>(LATEST_SQL)
                    .bind(college_id)
                    .bind(silo.as_str())
                    .fetch_optional(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, CollegeContent>(LATEST_SQL)
                    .bind(college_id)
                    .bind(silo.as_str())
                    .fetch_optional(p)
                    .await
            }
        }
        .with_context(|| format!("Failed to get latest {} content", silo))
    }
}
