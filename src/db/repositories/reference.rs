//! Reference table repository (countries, states, cities, streams)

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::db::{Backend, DynDatabasePool};
use crate::models::{ReferenceEntry, ReferenceKind};

#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// Look up an entry by name, ignoring case
    async fn find_by_name(&self, kind: ReferenceKind, name: &str) -> Result<Option<ReferenceEntry>>;
    /// Names of entries referenced by at least one college, sorted ascending
    async fn names_with_colleges(&self, kind: ReferenceKind) -> Result<Vec<String>>;
}

pub struct SqlxReferenceRepository {
    pool: DynDatabasePool,
}

impl SqlxReferenceRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ReferenceRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ReferenceRepository for SqlxReferenceRepository {
    async fn find_by_name(&self, kind: ReferenceKind, name: &str) -> Result<Option<ReferenceEntry>> {
        let sql = format!(
            "SELECT id, name, slug FROM {} WHERE LOWER(name) = LOWER(?) ORDER BY id ASC LIMIT 1",
            kind.table()
        );
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, ReferenceEntry>(&sql)
                    .bind(name)
                    .fetch_optional(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, ReferenceEntry>(&sql)
                    .bind(name)
                    .fetch_optional(p)
                    .await
            }
        }
        .with_context(|| format!("Failed to look up {}", kind.table()))
    }

    async fn names_with_colleges(&self, kind: ReferenceKind) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT t.name FROM {table} t \
             WHERE EXISTS (SELECT 1 FROM colleges c WHERE c.{column} = t.id) \
             ORDER BY t.name ASC",
            table = kind.table(),
            column = kind.college_column(),
        );
        match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_scalar::<_, String>(&sql).fetch_all(p).await,
            Backend::Mysql(p) => sqlx::query_scalar::<_, String>(&sql).fetch_all(p).await,
        }
        .with_context(|| format!("Failed to list {} facets", kind.table()))
    }
}
