//! Catalog articles (news, exam guides, course explainers, blog posts)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::UnknownSilo;

/// Editorial category of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSilo {
    News,
    Exam,
    Course,
    Blog,
}

impl ArticleSilo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Exam => "exam",
            Self::Course => "course",
            Self::Blog => "blog",
        }
    }
}

impl std::fmt::Display for ArticleSilo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArticleSilo {
    type Err = UnknownSilo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "news" => Ok(Self::News),
            "exam" => Ok(Self::Exam),
            "course" => Ok(Self::Course),
            "blog" => Ok(Self::Blog),
            _ => Err(UnknownSilo(s.to_string())),
        }
    }
}

impl TryFrom<String> for ArticleSilo {
    type Error = UnknownSilo;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Article entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub silos: ArticleSilo,
    pub meta_desc: Option<String>,
    pub og_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Article as it appears in global search results
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArticleSearchHit {
    pub id: i64,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub silos: ArticleSilo,
    pub meta_desc: Option<String>,
    pub created_at: DateTime<Utc>,
}
