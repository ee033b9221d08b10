//! Database repositories
//!
//! One repository per aggregate. Each exposes an `async_trait` interface and
//! a `Sqlx*Repository` implementation that runs the same SQL against
//! whichever backend the pool was opened with.

pub mod article;
pub mod college;
pub mod college_course;
pub mod contact;
pub mod content;
pub mod course;
pub mod lead;
pub mod reference;
pub mod subscription;

pub use article::{ArticleRepository, SqlxArticleRepository};
pub use college::{CollegeRepository, SqlxCollegeRepository};
pub use college_course::{CollegeCourseRepository, SqlxCollegeCourseRepository};
pub use contact::{ContactRepository, SqlxContactRepository};
pub use content::{ContentRepository, SqlxContentRepository};
pub use course::{CourseRepository, SqlxCourseRepository};
pub use lead::{LeadRepository, SqlxLeadRepository};
pub use reference::{ReferenceRepository, SqlxReferenceRepository};
pub use subscription::{SqlxSubscriptionRepository, SubscriptionRepository};

/// Escape character used by every `LIKE ... ESCAPE '!'` clause
const LIKE_ESCAPE: char = '!';

/// Build a `%term%` pattern that matches `term` literally
///
/// `%` and `_` in user input are escaped so they do not act as wildcards.
/// Pair with `ESCAPE '!'` in the query.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Whether an error chain bottoms out in a UNIQUE constraint failure
pub(crate) fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(sqlx::Error::as_database_error)
        .is_some_and(|db| db.is_unique_violation())
}
