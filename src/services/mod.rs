//! Services layer
//!
//! Validation and composition of repository calls. Each service owns a
//! `thiserror` error enum that the API layer maps onto HTTP responses.

pub mod article;
pub mod college;
pub mod contact;
pub mod lead;
pub mod search;
pub mod subscription;

pub use article::{ArticleService, ArticleServiceError};
pub use college::{CollegeListing, CollegeService, CollegeServiceError, TOP_COLLEGES_LIMIT};
pub use contact::{ContactService, ContactServiceError};
pub use lead::{LeadService, LeadServiceError};
pub use search::{SearchResults, SearchService, SearchServiceError, SEARCH_LIMIT};
pub use subscription::{SubscriptionService, SubscriptionServiceError};
