//! College service
//!
//! Composes the college, course, content and reference repositories into
//! the shapes served by the `/college` endpoints. Lookups that do not depend
//! on each other are issued together with `tokio::try_join!`.

use std::sync::Arc;
use thiserror::Error;

use crate::db::repositories::{
    CollegeCourseRepository, CollegeRepository, ContentRepository, ReferenceRepository,
};
use crate::models::{
    CollegeCourses, CollegeFaqs, CollegeFees, CollegeFilters, CollegeInfo,
    CollegeInfoBasic, CollegeSummary, ContentSilo, ListParams, PagedResult, ReferenceKind,
    TopCollege,
};

/// Number of colleges in the top ranking
pub const TOP_COLLEGES_LIMIT: i64 = 6;

/// College service error types
#[derive(Debug, Error)]
pub enum CollegeServiceError {
    #[error("College not found: {0}")]
    NotFound(i64),

    /// The requested stream does not exist
    #[error("Invalid stream: {0}")]
    InvalidStream(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// One listing page plus the filter facets
#[derive(Debug, Clone)]
pub struct CollegeListing {
    pub page: PagedResult<CollegeSummary>,
    pub filters: CollegeFilters,
}

pub struct CollegeService {
    colleges: Arc<dyn CollegeRepository>,
    courses: Arc<dyn CollegeCourseRepository>,
    content: Arc<dyn ContentRepository>,
    references: Arc<dyn ReferenceRepository>,
}

impl CollegeService {
    pub fn new(
        colleges: Arc<dyn CollegeRepository>,
        courses: Arc<dyn CollegeCourseRepository>,
        content: Arc<dyn ContentRepository>,
        references: Arc<dyn ReferenceRepository>,
    ) -> Self {
        Self {
            colleges,
            courses,
            content,
            references,
        }
    }

    /// Highest scoring colleges, optionally within one stream
    ///
    /// The stream is matched by name, ignoring case. A blank stream is
    /// treated as no filter.
    pub async fn top(&self, stream: Option<&str>) -> Result<Vec<TopCollege>, CollegeServiceError> {
        let stream_id = match stream.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => {
                let entry = self
                    .references
                    .find_by_name(ReferenceKind::Stream, name)
                    .await?
                    .ok_or_else(|| CollegeServiceError::InvalidStream(name.to_string()))?;
                Some(entry.id)
            }
            None => None,
        };

        Ok(self.colleges.list_top(stream_id, TOP_COLLEGES_LIMIT).await?)
    }

    pub async fn info(&self, id: i64) -> Result<CollegeInfo, CollegeServiceError> {
        let (college, course_count, info_content) = tokio::try_join!(
            self.colleges.get_by_id(id),
            self.colleges.course_count(id),
            self.content.list_by_college(id, ContentSilo::Info),
        )?;
        let college = college.ok_or(CollegeServiceError::NotFound(id))?;

        Ok(CollegeInfo {
            basic: CollegeInfoBasic {
                college,
                course_count,
                info_content,
            },
        })
    }

    pub async fn courses(&self, id: i64) -> Result<CollegeCourses, CollegeServiceError> {
        let (college, courses, course_content) = tokio::try_join!(
            self.colleges.get_by_id(id),
            self.courses.list_by_college(id),
            self.content.list_by_college(id, ContentSilo::Course),
        )?;
        let basic = college.ok_or(CollegeServiceError::NotFound(id))?;

        Ok(CollegeCourses {
            basic,
            course_count: courses.len(),
            courses,
            course_content,
        })
    }

    pub async fn fees(&self, id: i64) -> Result<CollegeFees, CollegeServiceError> {
        let (college, fees) = tokio::try_join!(
            self.colleges.get_by_id(id),
            self.courses.list_by_college(id),
        )?;
        let basic = college.ok_or(CollegeServiceError::NotFound(id))?;

        Ok(CollegeFees { basic, fees })
    }

    /// College with its most recently updated FAQ block
    pub async fn faqs(&self, id: i64) -> Result<CollegeFaqs, CollegeServiceError> {
        let (college, faq) = tokio::try_join!(
            self.colleges.get_by_id(id),
            self.content.latest_by_college(id, ContentSilo::Faq),
        )?;
        let basic = college.ok_or(CollegeServiceError::NotFound(id))?;

        Ok(CollegeFaqs { basic, faq })
    }

    /// A page of colleges by score, with the stream/city/state facets
    pub async fn list(&self, params: &ListParams) -> Result<CollegeListing, CollegeServiceError> {
        let (items, total, stream, city, state) = tokio::try_join!(
            self.colleges.list_summaries(params),
            self.colleges.count(),
            self.references.names_with_colleges(ReferenceKind::Stream),
            self.references.names_with_colleges(ReferenceKind::City),
            self.references.names_with_colleges(ReferenceKind::State),
        )?;

        Ok(CollegeListing {
            page: PagedResult::new(items, total, params),
            filters: CollegeFilters {
                stream,
                city,
                state,
            },
        })
    }
}
