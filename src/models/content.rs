//! Per-college editorial content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a silo name is not one of the known values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown silo: {0}")]
pub struct UnknownSilo(pub String);

/// Section of a college profile a content row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSilo {
    Info,
    Course,
    Fees,
    Scholarship,
    Placement,
    Faq,
}

impl ContentSilo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Course => "course",
            Self::Fees => "fees",
            Self::Scholarship => "scholarship",
            Self::Placement => "placement",
            Self::Faq => "faq",
        }
    }
}

impl std::fmt::Display for ContentSilo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentSilo {
    type Err = UnknownSilo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "course" => Ok(Self::Course),
            "fees" => Ok(Self::Fees),
            "scholarship" => Ok(Self::Scholarship),
            "placement" => Ok(Self::Placement),
            "faq" => Ok(Self::Faq),
            _ => Err(UnknownSilo(s.to_string())),
        }
    }
}

impl TryFrom<String> for ContentSilo {
    type Error = UnknownSilo;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A block of free text attached to one college
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CollegeContent {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub silos: ContentSilo,
    pub college_id: i64,
    pub meta_desc: Option<String>,
    pub og_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
