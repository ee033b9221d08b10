//! Lead form service

use std::sync::Arc;
use thiserror::Error;

use crate::db::repositories::LeadRepository;
use crate::models::{non_blank, CreateLeadInput, LeadForm, ListParams, NewLead, PagedResult, UpdateLeadInput};

pub const MISSING_LEAD_FIELDS: &str =
    "Missing required fields: name, email, and phn_no are required";

#[derive(Debug, Error)]
pub enum LeadServiceError {
    #[error("Lead form not found: {0}")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub struct LeadService {
    repo: Arc<dyn LeadRepository>,
}

impl LeadService {
    pub fn new(repo: Arc<dyn LeadRepository>) -> Self {
        Self { repo }
    }

    /// Store a lead; every field must be present and non-blank
    pub async fn create(&self, input: CreateLeadInput) -> Result<LeadForm, LeadServiceError> {
        let lead = validate_new_lead(input)?;
        let created = self.repo.create(&lead).await?;
        tracing::info!(lead_id = created.id, "Lead form created");
        Ok(created)
    }

    pub async fn list(&self, params: &ListParams) -> Result<PagedResult<LeadForm>, LeadServiceError> {
        let (items, total) = tokio::try_join!(self.repo.list(params), self.repo.count())?;
        Ok(PagedResult::new(items, total, params))
    }

    pub async fn get(&self, id: i64) -> Result<LeadForm, LeadServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(LeadServiceError::NotFound(id))
    }

    /// Replace only the non-blank fields of `input`
    pub async fn update(&self, id: i64, input: UpdateLeadInput) -> Result<LeadForm, LeadServiceError> {
        let input = input.normalized();
        if !input.has_changes() {
            return self.get(id).await;
        }

        self.repo
            .update(id, &input)
            .await?
            .ok_or(LeadServiceError::NotFound(id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), LeadServiceError> {
        if !self.repo.delete(id).await? {
            return Err(LeadServiceError::NotFound(id));
        }
        tracing::info!(lead_id = id, "Lead form deleted");
        Ok(())
    }
}

fn validate_new_lead(input: CreateLeadInput) -> Result<NewLead, LeadServiceError> {
    match (
        non_blank(input.name),
        non_blank(input.email),
        non_blank(input.phn_no),
    ) {
        (Some(name), Some(email), Some(phn_no)) => Ok(NewLead { name, email, phn_no }),
        _ => Err(LeadServiceError::ValidationError(MISSING_LEAD_FIELDS.to_string())),
    }
}
