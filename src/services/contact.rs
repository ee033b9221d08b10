//! Contact-us service

use std::sync::Arc;
use thiserror::Error;

use crate::db::repositories::ContactRepository;
use crate::models::{non_blank, ContactMessage, CreateContactInput};

pub const MISSING_CONTACT_FIELDS: &str =
    "Missing required fields: name, email, and message are required";

#[derive(Debug, Error)]
pub enum ContactServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    pub async fn submit(&self, input: CreateContactInput) -> Result<ContactMessage, ContactServiceError> {
        let (name, email, message) = match (
            non_blank(input.name),
            non_blank(input.email),
            non_blank(input.message),
        ) {
            (Some(name), Some(email), Some(message)) => (name, email, message),
            _ => {
                return Err(ContactServiceError::ValidationError(
                    MISSING_CONTACT_FIELDS.to_string(),
                ))
            }
        };
        let phn_no = non_blank(input.phn_no);

        let stored = self
            .repo
            .create(&name, &email, phn_no.as_deref(), &message)
            .await?;
        tracing::info!(contact_id = stored.id, "Contact message received");
        Ok(stored)
    }
}
