//! Data models
//!
//! Database rows, the aggregate shapes the API serves, and request inputs.

mod article;
mod college;
mod content;
mod course;
pub mod json_text;
mod lead;
mod pagination;
mod reference;

pub use article::{Article, ArticleSearchHit, ArticleSilo};
pub use college::{
    College, CollegeCourses, CollegeFaqs, CollegeFees, CollegeFilters, CollegeInfo,
    CollegeInfoBasic, CollegeSearchHit, CollegeSummary, TopCollege,
};
pub use content::{CollegeContent, ContentSilo, UnknownSilo};
pub use course::{CollegeCourse, CourseSearchHit};
pub use lead::{
    non_blank, ContactMessage, CreateContactInput, CreateLeadInput, CreateSubscriptionInput,
    LeadForm, NewLead, Subscription, UpdateLeadInput,
};
pub use pagination::{ListParams, PagedResult, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use reference::{ReferenceEntry, ReferenceKind};
