//! Newsletter subscription repository

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::db::{Backend, DynDatabasePool};
use crate::models::Subscription;

const INSERT_SQL: &str =
    "INSERT INTO subscriptions (name, email, phn_no, created_at) VALUES (?, ?, ?, ?)";

const GET_SQL: &str = "SELECT id, name, email, phn_no, created_at FROM subscriptions WHERE id = ?";

const EXISTS_SQL: &str = "SELECT COUNT(*) FROM subscriptions WHERE LOWER(email) = LOWER(?)";

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, name: Option<&str>, email: &str, phn_no: Option<&str>) -> Result<Subscription>;
    /// Case-insensitive check for an existing subscription
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
}

pub struct SqlxSubscriptionRepository {
    pool: DynDatabasePool,
}

impl SqlxSubscriptionRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn SubscriptionRepository> {
        Arc::new(Self::new(pool))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Subscription>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_as::<_, Subscription>(GET_SQL).bind(id).fetch_optional(p).await,
            Backend::Mysql(p) => sqlx::query_as::<_, Subscription>(GET_SQL).bind(id).fetch_optional(p).await,
        }
        .context("Failed to get subscription")
    }
}

#[async_trait]
impl SubscriptionRepository for SqlxSubscriptionRepository {
    async fn create(&self, name: Option<&str>, email: &str, phn_no: Option<&str>) -> Result<Subscription> {
        let now = Utc::now();
        let id = match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query(INSERT_SQL)
                .bind(name)
                .bind(email)
                .bind(phn_no)
                .bind(now)
                .execute(p)
                .await
                .map(|r| r.last_insert_rowid()),
            Backend::Mysql(p) => sqlx::query(INSERT_SQL)
                .bind(name)
                .bind(email)
                .bind(phn_no)
                .bind(now)
                .execute(p)
                .await
                .map(|r| r.last_insert_id() as i64),
        }
        .context("Failed to create subscription")?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Subscription {} missing after insert", id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let count = match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_scalar::<_, i64>(EXISTS_SQL).bind(email).fetch_one(p).await,
            Backend::Mysql(p) => sqlx::query_scalar::<_, i64>(EXISTS_SQL).bind(email).fetch_one(p).await,
        }
        .context("Failed to check subscription email")?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn test_create_with_optional_fields() {
        let pool = test_support::setup().await;
        let repo = SqlxSubscriptionRepository::new(pool);

        let sub = repo.create(None, "reader@example.com", None).await.unwrap();
        assert_eq!(sub.email, "reader@example.com");
        assert!(sub.name.is_none());

        let sub = repo
            .create(Some("Lea"), "lea@example.com", Some("0411 000 000"))
            .await
            .unwrap();
        assert_eq!(sub.name.as_deref(), Some("Lea"));
        assert_eq!(sub.phn_no.as_deref(), Some("0411 000 000"));
    }

    #[tokio::test]
    async fn test_exists_by_email_ignores_case() {
        let pool = test_support::setup().await;
        let repo = SqlxSubscriptionRepository::new(pool);
        repo.create(None, "Reader@Example.com", None).await.unwrap();

        assert!(repo.exists_by_email("reader@example.com").await.unwrap());
        assert!(!repo.exists_by_email("other@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_by_schema() {
        let pool = test_support::setup().await;
        let repo = SqlxSubscriptionRepository::new(pool);
        repo.create(None, "dup@example.com", None).await.unwrap();

        let err = repo.create(None, "dup@example.com", None).await.unwrap_err();
        assert!(crate::db::repositories::is_unique_violation(&err));
    }
}
