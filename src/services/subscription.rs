//! Newsletter subscription service

use std::sync::Arc;
use thiserror::Error;

use crate::db::repositories::{is_unique_violation, SubscriptionRepository};
use crate::models::{non_blank, CreateSubscriptionInput, Subscription};

#[derive(Debug, Error)]
pub enum SubscriptionServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Email is already subscribed: {0}")]
    AlreadySubscribed(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repo }
    }

    pub async fn subscribe(&self, input: CreateSubscriptionInput) -> Result<Subscription, SubscriptionServiceError> {
        let email = non_blank(input.email)
            .ok_or_else(|| SubscriptionServiceError::ValidationError("Email is required".to_string()))?;

        if self.repo.exists_by_email(&email).await? {
            return Err(SubscriptionServiceError::AlreadySubscribed(email));
        }

        let name = non_blank(input.name);
        let phn_no = non_blank(input.phn_no);
        // A concurrent request can insert the same email after the check above
        let created = match self.repo.create(name.as_deref(), &email, phn_no.as_deref()).await {
            Ok(created) => created,
            Err(e) if is_unique_violation(&e) => {
                return Err(SubscriptionServiceError::AlreadySubscribed(email));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(subscription_id = created.id, "Subscription created");
        Ok(created)
    }
}
