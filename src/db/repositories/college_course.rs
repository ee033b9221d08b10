//! Course offerings of a college, with their fees

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::db::{Backend, DynDatabasePool};
use crate::models::CollegeCourse;

const LIST_BY_COLLEGE_SQL: &str = r#"
    SELECT id, name, duration_in_months, tuition_fees, hostel_fees, one_time_fees, other_fees,
           college_id, course_id, stream_id, meta_desc, og_img, created_at, updated_at
    FROM college_courses
    WHERE college_id = ?
    ORDER BY id ASC
"#;

#[async_trait]
pub trait CollegeCourseRepository: Send + Sync {
    async fn list_by_college(&self, college_id: i64) -> Result<Vec<CollegeCourse>>;
}

pub struct SqlxCollegeCourseRepository {
    pool: DynDatabasePool,
}

impl SqlxCollegeCourseRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CollegeCourseRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CollegeCourseRepository for SqlxCollegeCourseRepository {
    async fn list_by_college(&self, college_id: i64) -> Result<Vec<CollegeCourse>> {
        match self.pool.backend() {
            Backend::Sqlite(p) => {
                sqlx::query_as::<_, CollegeCourse>(LIST_BY_COLLEGE_SQL)
                    .bind(college_id)
                    .fetch_all(p)
                    .await
            }
            Backend::Mysql(p) => {
                sqlx::query_as::<_, CollegeCourse>(LIST_BY_COLLEGE_SQL)
                    .bind(college_id)
                    .fetch_all(p)
                    .await
            }
        }
        .context("Failed to list college courses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, CollegeSeed};

    #[tokio::test]
    async fn test_list_by_college_only_returns_own_courses() {
        let pool = test_support::setup().await;
        let a = test_support::insert_college(&pool, &CollegeSeed::named("A", 1)).await;
        let b = test_support::insert_college(&pool, &CollegeSeed::named("B", 1)).await;
        let course = test_support::insert_course(&pool, "Nursing", 3).await;
        test_support::insert_college_course(&pool, a, course, "BSc Nursing", 28000.0).await;
        test_support::insert_college_course(&pool, b, course, "Nursing Diploma", 12000.0).await;

        let repo = SqlxCollegeCourseRepository::new(pool);
        let courses = repo.list_by_college(a).await.unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "BSc Nursing");
        assert_eq!(courses[0].tuition_fees, 28000.0);
        assert_eq!(courses[0].college_id, a);
    }

    #[tokio::test]
    async fn test_other_fees_serialize_as_object() {
        let pool = test_support::setup().await;
        let college = test_support::insert_college(&pool, &CollegeSeed::named("Fees", 1)).await;
        let course = test_support::insert_course(&pool, "Arts", 3).await;
        test_support::insert_college_course(&pool, college, course, "BA", 20000.0).await;

        let repo = SqlxCollegeCourseRepository::new(pool);
        let courses = repo.list_by_college(college).await.unwrap();
        let json = serde_json::to_value(&courses[0]).unwrap();

        assert_eq!(json["other_fees"]["application"], 100);
    }

    #[tokio::test]
    async fn test_empty_college() {
        let pool = test_support::setup().await;
        let repo = SqlxCollegeCourseRepository::new(pool);
        assert!(repo.list_by_college(42).await.unwrap().is_empty());
    }
}
