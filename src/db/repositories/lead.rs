//! Lead form repository

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::db::{Backend, DynDatabasePool};
use crate::models::{LeadForm, ListParams, NewLead, UpdateLeadInput};

const INSERT_SQL: &str =
    "INSERT INTO lead_forms (name, email, phn_no, created_at, updated_at) VALUES (?, ?, ?, ?, ?)";

const GET_SQL: &str =
    "SELECT id, name, email, phn_no, created_at, updated_at FROM lead_forms WHERE id = ?";

const LIST_SQL: &str = r#"
    SELECT id, name, email, phn_no, created_at, updated_at
    FROM lead_forms
    ORDER BY created_at DESC, id DESC
    LIMIT ? OFFSET ?
"#;

const COUNT_SQL: &str = "SELECT COUNT(*) FROM lead_forms";

const UPDATE_SQL: &str = r#"
    UPDATE lead_forms
    SET name = COALESCE(?, name),
        email = COALESCE(?, email),
        phn_no = COALESCE(?, phn_no),
        updated_at = ?
    WHERE id = ?
"#;

const DELETE_SQL: &str = "DELETE FROM lead_forms WHERE id = ?";

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn create(&self, lead: &NewLead) -> Result<LeadForm>;
    async fn get_by_id(&self, id: i64) -> Result<Option<LeadForm>>;
    /// Newest first
    async fn list(&self, params: &ListParams) -> Result<Vec<LeadForm>>;
    async fn count(&self) -> Result<i64>;
    /// Replace the supplied fields; `None` when the lead does not exist
    async fn update(&self, id: i64, input: &UpdateLeadInput) -> Result<Option<LeadForm>>;
    /// Returns whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct SqlxLeadRepository {
    pool: DynDatabasePool,
}

impl SqlxLeadRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn LeadRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl LeadRepository for SqlxLeadRepository {
    async fn create(&self, lead: &NewLead) -> Result<LeadForm> {
        let now = Utc::now();
        let id = match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query(INSERT_SQL)
                .bind(&lead.name)
                .bind(&lead.email)
                .bind(&lead.phn_no)
                .bind(now)
                .bind(now)
                .execute(p)
                .await
                .map(|r| r.last_insert_rowid()),
            Backend::Mysql(p) => sqlx::query(INSERT_SQL)
                .bind(&lead.name)
                .bind(&lead.email)
                .bind(&lead.phn_no)
                .bind(now)
                .bind(now)
                .execute(p)
                .await
                .map(|r| r.last_insert_id() as i64),
        }
        .context("Failed to create lead form")?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Lead form {} missing after insert", id))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<LeadForm>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_as::<_, LeadForm>(GET_SQL).bind(id).fetch_optional(p).await,
            Backend::Mysql(p) => sqlx::query_as::<_, LeadForm>(GET_SQL).bind(id).fetch_optional(p).await,
        }
        .context("Failed to get lead form")
    }

    async fn list(&self, params: &ListParams) -> Result<Vec<LeadForm>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, LeadForm>(LIST_SQL)
                    .bind(params.limit())
                    .bind(params.offset())
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, LeadForm>(LIST_SQL)
                    .bind(params.limit())
                    .bind(params.offset())
                    .fetch_all(p)
                    .await
            }
        }
        .context("Failed to list lead forms")
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_scalar::<_, i64>(COUNT_SQL).fetch_one(p).await,
            Backend::Mysql(p) => sqlx::query_scalar::<_, i64>(COUNT_SQL).fetch_one(p).await,
        }
        .context("Failed to count lead forms")
    }

    async fn update(&self, id: i64, input: &UpdateLeadInput) -> Result<Option<LeadForm>> {
        let now = Utc::now();
        match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query(UPDATE_SQL)
                .bind(&input.name)
                .bind(&input.email)
                .bind(&input.phn_no)
                .bind(now)
                .bind(id)
                .execute(p)
                .await
                .map(|_| ()),
            Backend::Mysql(p) => sqlx::query(UPDATE_SQL)
                .bind(&input.name)
                .bind(&input.email)
                .bind(&input.phn_no)
                .bind(now)
                .bind(id)
                .execute(p)
                .await
                .map(|_| ()),
        }
        .context("Failed to update lead form")?;

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let affected = match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query(DELETE_SQL)
                .bind(id)
                .execute(p)
                .await
                .map(|r| r.rows_affected()),
            Backend::Mysql(p) => sqlx::query(DELETE_SQL)
                .bind(id)
                .execute(p)
                .await
                .map(|r| r.rows_affected()),
        }
        .context("Failed to delete lead form")?;
        Ok(affected > 0)
    }
}
