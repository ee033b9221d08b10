//! Visitor-submitted records: lead forms, newsletter subscriptions and
//! contact-us messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact-capture record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LeadForm {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phn_no: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /leads`
///
/// Fields are optional at the type level so a missing field becomes a
/// validation error with a readable message instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLeadInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phn_no: Option<String>,
}

/// Validated lead ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phn_no: String,
}

/// Body of `PUT /leads/view/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLeadInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phn_no: Option<String>,
}

impl UpdateLeadInput {
    /// Drop blank values so they leave the stored field untouched
    pub fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
            email: non_blank(self.email),
            phn_no: non_blank(self.phn_no),
        }
    }

    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.phn_no.is_some()
    }
}

/// Newsletter subscription
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub phn_no: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubscriptionInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phn_no: Option<String>,
}

/// Message sent through the contact-us form
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phn_no: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phn_no: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Treat a whitespace-only value as absent; anything else is kept as given
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(Some(" Ana ".into())), Some(" Ana ".to_string()));
    }

    #[test]
    fn test_update_input_normalization() {
        let input = UpdateLeadInput {
            name: Some(String::new()),
            email: Some("new@example.com".into()),
            phn_no: None,
        }
        .normalized();

        assert_eq!(input.name, None);
        assert_eq!(input.email.as_deref(), Some("new@example.com"));
        assert!(input.has_changes());
        assert!(!UpdateLeadInput::default().normalized().has_changes());
    }

    #[test]
    fn test_create_input_tolerates_missing_fields() {
        let input: CreateLeadInput = serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Ana"));
        assert!(input.email.is_none());
    }
}
