//! Contact-us message repository

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::db::{Backend, DynDatabasePool};
use crate::models::ContactMessage;

const INSERT_SQL: &str =
    "INSERT INTO contact_messages (name, email, phn_no, message, created_at) VALUES (?, ?, ?, ?, ?)";

const GET_SQL: &str =
    "SELECT id, name, email, phn_no, message, created_at FROM contact_messages WHERE id = ?";

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, name: &str, email: &str, phn_no: Option<&str>, message: &str) -> Result<ContactMessage>;
}

pub struct SqlxContactRepository {
    pool: DynDatabasePool,
}

impl SqlxContactRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ContactRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepository {
    async fn create(&self, name: &str, email: &str, phn_no: Option<&str>, message: &str) -> Result<ContactMessage> {
        let now = Utc::now();
        let id = match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query(INSERT_SQL)
                .bind(name)
                .bind(email)
                .bind(phn_no)
                .bind(message)
                .bind(now)
                .execute(p)
                .await
                .map(|r| r.last_insert_rowid()),
            Backend::Mysql(p) => sqlx::query(INSERT_SQL)
                .bind(name)
                .bind(email)
                .bind(phn_no)
                .bind(message)
                .bind(now)
                .execute(p)
                .await
                .map(|r| r.last_insert_id() as i64),
        }
        .context("Failed to store contact message")?;

        let stored = match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_as::<_, ContactMessage>(GET_SQL).bind(id).fetch_optional(p).await,
            Backend::Mysql(p) => sqlx::query_as::<_, ContactMessage>(GET_SQL).bind(id).fetch_optional(p).await,
        }
        .context("Failed to read contact message")?;

        stored.ok_or_else(|| anyhow!("Contact message {} missing after insert", id))
    }
}
