//! Article repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::like_pattern;
use crate::db::{Backend, DynDatabasePool};
use crate::models::{Article, ArticleSearchHit, ArticleSilo, ListParams};

const LIST_SQL: &str = r#"
    SELECT id, title, content, silos, meta_desc, og_img, created_at, updated_at
    FROM articles
    WHERE (? IS NULL OR silos = ?)
    ORDER BY created_at DESC, id DESC
    LIMIT ? OFFSET ?
"#;

const COUNT_SQL: &str = "SELECT COUNT(*) FROM articles WHERE (? IS NULL OR silos = ?)";

const GET_SQL: &str = r#"
    SELECT id, title, content, silos, meta_desc, og_img, created_at, updated_at
    FROM articles
    WHERE id = ?
"#;

const SEARCH_SQL: &str = r#"
    SELECT id, title, silos, meta_desc, created_at
    FROM articles
    WHERE LOWER(title) LIKE LOWER(?) ESCAPE '!'
       OR LOWER(content) LIKE LOWER(?) ESCAPE '!'
    ORDER BY created_at DESC, id DESC
    LIMIT ?
"#;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Newest first, optionally restricted to one silo
    async fn list(&self, silo: Option<ArticleSilo>, params: &ListParams) -> Result<Vec<Article>>;
    async fn count(&self, silo: Option<ArticleSilo>) -> Result<i64>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Article>>;
    /// Articles whose title or body contains `query`, case-insensitively
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<ArticleSearchHit>>;
}

pub struct SqlxArticleRepository {
    pool: DynDatabasePool,
}

impl SqlxArticleRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ArticleRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn list(&self, silo: Option<ArticleSilo>, params: &ListParams) -> Result<Vec<Article>> {
        let silo = silo.map(|s| s.as_str());
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, Article>(LIST_SQL)
                    .bind(silo)
                    .bind(silo)
                    .bind(params.limit())
                    .bind(params.offset())
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, Article>(LIST_SQL)
                    .bind(silo)
                    .bind(silo)
                    .bind(params.limit())
                    .bind(params.offset())
                    .fetch_all(p)
                    .await
            }
        }
        .context("Failed to list articles")
    }

    async fn count(&self, silo: Option<ArticleSilo>) -> Result<i64> {
        let silo = silo.map(|s| s.as_str());
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_scalar::<_, i64>(COUNT_SQL)
                    .bind(silo)
                    .bind(silo)
                    .fetch_one(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_scalar::<_, i64>(COUNT_SQL)
                    .bind(silo)
                    .bind(silo)
                    .fetch_one(p)
                    .await
            }
        }
        .context("Failed to count articles")
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => sqlx::query_as::<_, Article>(GET_SQL).bind(id).fetch_optional(p).await,
            Backend::Mysql(p) => sqlx::query_as::<_, Article>(GET_SQL).bind(id).fetch_optional(p).await,
        }
        .context("Failed to get article")
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<ArticleSearchHit>> {
        let pattern = like_pattern(query);
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, ArticleSearchHit>(SEARCH_SQL)
                    .bind(&pattern)
                    .bind(&pattern)
                    .bind(limit)
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, ArticleSearchHit>(SEARCH_SQL)
                    .bind(&pattern)
                    .bind(&pattern)
                    .bind(limit)
                    .fetch_all(p)
                    .await
            }
        }
        .context("Failed to search articles")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn test_list_newest_first_with_silo_filter() {
        let pool = test_support::setup().await;
        test_support::insert_article(&pool, "Oldest news", "body", ArticleSilo::News, 0).await;
        test_support::insert_article(&pool, "Exam dates", "body", ArticleSilo::Exam, 10).await;
        test_support::insert_article(&pool, "Latest news", "body", ArticleSilo::News, 20).await;

        let repo = SqlxArticleRepository::new(pool);

        let all = repo.list(None, &ListParams::default()).await.unwrap();
        let titles: Vec<_> = all.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Latest news", "Exam dates", "Oldest news"]);
        assert_eq!(repo.count(None).await.unwrap(), 3);

        let news = repo.list(Some(ArticleSilo::News), &ListParams::default()).await.unwrap();
        assert_eq!(news.len(), 2);
        assert!(news.iter().all(|a| a.silos == ArticleSilo::News));
        assert_eq!(repo.count(Some(ArticleSilo::News)).await.unwrap(), 2);
        assert_eq!(repo.count(Some(ArticleSilo::Blog)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_pages() {
        let pool = test_support::setup().await;
        for i in 0..5 {
            test_support::insert_article(&pool, &format!("Post {}", i), "body", ArticleSilo::Blog, i).await;
        }
        let repo = SqlxArticleRepository::new(pool);

        let page = repo.list(None, &ListParams::new(2, 2)).await.unwrap();
        let titles: Vec<_> = page.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 2", "Post 1"]);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let pool = test_support::setup().await;
        let id = test_support::insert_article(&pool, "Visa guide", "Steps", ArticleSilo::Blog, 0).await;
        let repo = SqlxArticleRepository::new(pool);

        let article = repo.get_by_id(id).await.unwrap().expect("article exists");
        assert_eq!(article.title, "Visa guide");
        assert_eq!(article.silos, ArticleSilo::Blog);
        assert!(repo.get_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_title_or_content() {
        let pool = test_support::setup().await;
        test_support::insert_article(&pool, "IELTS scores", "What you need", ArticleSilo::Exam, 0).await;
        test_support::insert_article(&pool, "Student life", "Preparing for ielts abroad", ArticleSilo::Blog, 5).await;
        test_support::insert_article(&pool, "Unrelated", "Nothing here", ArticleSilo::News, 10).await;

        let repo = SqlxArticleRepository::new(pool);
        let hits = repo.search("Ielts", 3).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Student life");
        assert_eq!(hits[1].silos, ArticleSilo::Exam);
    }
}
