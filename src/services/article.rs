//! Article service

use std::sync::Arc;
use thiserror::Error;

use crate::db::repositories::ArticleRepository;
use crate::models::{Article, ArticleSilo, ListParams, PagedResult};

#[derive(Debug, Error)]
pub enum ArticleServiceError {
    #[error("Article not found: {0}")]
    NotFound(i64),

    #[error("Invalid silo: {0}")]
    InvalidSilo(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    /// Newest articles first, optionally restricted to one silo
    pub async fn list(
        &self,
        silo: Option<&str>,
        params: &ListParams,
    ) -> Result<PagedResult<Article>, ArticleServiceError> {
        let silo = match silo.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<ArticleSilo>()
                    .map_err(|_| ArticleServiceError::InvalidSilo(raw.to_string()))?,
            ),
            None => None,
        };

        let (items, total) = tokio::try_join!(self.repo.list(silo, params), self.repo.count(silo))?;
        Ok(PagedResult::new(items, total, params))
    }

    pub async fn get(&self, id: i64) -> Result<Article, ArticleServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ArticleServiceError::NotFound(id))
    }
}
