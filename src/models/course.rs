//! Courses and the per-college course offerings with their fees

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::json_text;

/// A course offered by a college, with its fee breakdown
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CollegeCourse {
    pub id: i64,
    pub name: String,
    pub duration_in_months: i64,
    pub tuition_fees: f64,
    pub hostel_fees: f64,
    pub one_time_fees: f64,
    /// Free-form fee map, e.g. `{"visa": {"amount": 650}}`
    #[serde(serialize_with = "json_text::serialize")]
    pub other_fees: Option<String>,
    pub college_id: i64,
    pub course_id: i64,
    pub stream_id: Option<i64>,
    pub meta_desc: Option<String>,
    pub og_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course as it appears in global search results
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CourseSearchHit {
    pub id: i64,
    pub course_name: String,
    pub duration_in_months: i64,
    pub rating: Option<f64>,
    pub score: i64,
}
