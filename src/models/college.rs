//! College entity and the shapes it is served in

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{json_text, CollegeContent, CollegeCourse};

/// Full college row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct College {
    pub id: i64,
    pub college_name: String,
    pub location: String,
    pub established: Option<DateTime<Utc>>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub logo_url: Option<String>,
    pub bg_url: Option<String>,
    /// Gallery document, stored as JSON text
    #[serde(serialize_with = "json_text::serialize")]
    pub media_url: Option<String>,
    pub rating: Option<f64>,
    pub score: i64,
    pub intake_start_date: Option<DateTime<Utc>>,
    pub pr_pathway: bool,
    pub slug: String,
    pub total_students: Option<i64>,
    pub acceptance_rate: Option<f64>,
    pub international_student_rate: Option<f64>,
    pub brochure_url: Option<String>,
    pub avg_fees_in_aud: Option<f64>,
    pub stream_id: Option<i64>,
    pub city_id: Option<i64>,
    pub state_id: Option<i64>,
    pub country_id: Option<i64>,
    pub meta_desc: Option<String>,
    pub og_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the paginated college listing
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CollegeSummary {
    pub id: i64,
    pub slug: String,
    pub logo_url: Option<String>,
    pub college_name: String,
    pub location: String,
    pub rating: Option<f64>,
    pub score: i64,
    pub brochure_url: Option<String>,
    pub avg_fees_in_aud: Option<f64>,
    pub city_name: Option<String>,
    pub state_name: Option<String>,
    pub course_count: i64,
}

/// Entry of the top colleges ranking
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopCollege {
    pub id: i64,
    pub college_name: String,
    pub logo_url: Option<String>,
    pub location: String,
    pub intake_start_date: Option<DateTime<Utc>>,
    pub pr_pathway: bool,
    pub slug: String,
    pub count_collegewise_course: i64,
}

/// College as it appears in global search results
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CollegeSearchHit {
    pub id: i64,
    pub college_name: String,
    pub location: String,
    pub logo_url: Option<String>,
    pub rating: Option<f64>,
    pub score: i64,
    /// Name of the college's stream
    pub primary_stream: Option<String>,
    pub slug: String,
}

/// Filter facets offered next to the listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollegeFilters {
    pub stream: Vec<String>,
    pub city: Vec<String>,
    pub state: Vec<String>,
}

/// `basic` block of the info endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CollegeInfoBasic {
    #[serde(flatten)]
    pub college: College,
    pub course_count: i64,
    pub info_content: Vec<CollegeContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollegeInfo {
    pub basic: CollegeInfoBasic,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollegeCourses {
    pub basic: College,
    pub course_count: usize,
    pub courses: Vec<CollegeCourse>,
    pub course_content: Vec<CollegeContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollegeFees {
    pub basic: College,
    pub fees: Vec<CollegeCourse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollegeFaqs {
    pub basic: College,
    pub faq: Option<CollegeContent>,
}
