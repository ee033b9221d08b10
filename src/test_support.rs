//! Fixtures shared by unit tests
//!
//! Every helper writes straight to the in-memory SQLite pool so tests can
//! arrange rows without going through the services under test.

use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::api::{build_router, AppState};
use sqlx::SqlitePool;

use crate::db::{create_test_pool, migrations, Backend, DynDatabasePool};
use crate::models::{ArticleSilo, ContentSilo, ReferenceKind};

/// Fresh in-memory database with the schema applied
pub async fn setup() -> DynDatabasePool {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// The SQLite pool behind a test database
pub fn sqlite(pool: &DynDatabasePool) -> &SqlitePool {
    match pool.backend() {
        Backend::Sqlite(p) => p,
        Backend::Mysql(_) => panic!("test pools are SQLite"),
    }
}

/// HTTP test server over the full router, CORS open to any origin
pub fn test_server(pool: DynDatabasePool) -> TestServer {
    TestServer::new(build_router(AppState::from_pool(pool), "*")).expect("Failed to start test server")
}

/// Fixed instant used as the origin for fixture timestamps
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

fn at(minutes: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(minutes)
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

pub async fn insert_reference(pool: &DynDatabasePool, kind: ReferenceKind, name: &str) -> i64 {
    insert_reference_with_slug(pool, kind, name, &slugify(name)).await
}

pub async fn insert_reference_with_slug(
    pool: &DynDatabasePool,
    kind: ReferenceKind,
    name: &str,
    slug: &str,
) -> i64 {
    let sql = format!("INSERT INTO {} (name, slug) VALUES (?, ?)", kind.table());
    sqlx::query(&sql)
        .bind(name)
        .bind(slug)
        .execute(sqlite(pool))
        .await
        .expect("Failed to insert reference row")
        .last_insert_rowid()
}

/// Builder for college rows
#[derive(Debug, Clone)]
pub struct CollegeSeed {
    pub name: String,
    pub location: String,
    pub score: i64,
    pub stream_id: Option<i64>,
    pub city_id: Option<i64>,
    pub state_id: Option<i64>,
}

impl CollegeSeed {
    pub fn named(name: &str, score: i64) -> Self {
        Self {
            name: name.to_string(),
            location: "Australia".to_string(),
            score,
            stream_id: None,
            city_id: None,
            state_id: None,
        }
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn stream(mut self, id: i64) -> Self {
        self.stream_id = Some(id);
        self
    }

    pub fn city(mut self, id: i64) -> Self {
        self.city_id = Some(id);
        self
    }

    pub fn state(mut self, id: i64) -> Self {
        self.state_id = Some(id);
        self
    }
}

pub async fn insert_college(pool: &DynDatabasePool, seed: &CollegeSeed) -> i64 {
    sqlx::query(
        r#"INSERT INTO colleges
           (college_name, location, logo_url, media_url, rating, score, intake_start_date,
            pr_pathway, slug, avg_fees_in_aud, stream_id, city_id, state_id, created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&seed.name)
    .bind(&seed.location)
    .bind(format!("https://cdn.example.com/{}.png", slugify(&seed.name)))
    .bind(r#"{"gallery": ["campus.jpg"]}"#)
    .bind(4.5_f64)
    .bind(seed.score)
    .bind(at(60 * 24 * 30))
    .bind(true)
    .bind(slugify(&seed.name))
    .bind(32000.0_f64)
    .bind(seed.stream_id)
    .bind(seed.city_id)
    .bind(seed.state_id)
    .bind(base_time())
    .bind(base_time())
    .execute(sqlite(pool))
    .await
    .expect("Failed to insert college")
    .last_insert_rowid()
}

/// Insert a course lasting two years
pub async fn insert_course(pool: &DynDatabasePool, name: &str, score: i64) -> i64 {
    sqlx::query(
        "INSERT INTO courses (course_name, duration_in_months, rating, score, created_at, updated_at) VALUES (?, 24, 4.0, ?, ?, ?)",
    )
    .bind(name)
    .bind(score)
    .bind(base_time())
    .bind(base_time())
    .execute(sqlite(pool))
    .await
    .expect("Failed to insert course")
    .last_insert_rowid()
}

pub async fn insert_college_course(
    pool: &DynDatabasePool,
    college_id: i64,
    course_id: i64,
    name: &str,
    tuition_fees: f64,
) -> i64 {
    sqlx::query(
        r#"INSERT INTO college_courses
           (name, duration_in_months, tuition_fees, hostel_fees, one_time_fees, other_fees,
            college_id, course_id, created_at, updated_at)
           VALUES (?, 24, ?, 9000, 500, ?, ?, ?, ?, ?)"#,
    )
    .bind(name)
    .bind(tuition_fees)
    .bind(r#"{"application": 100}"#)
    .bind(college_id)
    .bind(course_id)
    .bind(base_time())
    .bind(base_time())
    .execute(sqlite(pool))
    .await
    .expect("Failed to insert college course")
    .last_insert_rowid()
}

/// Insert a content row last updated `minutes` after the base time
pub async fn insert_content(
    pool: &DynDatabasePool,
    college_id: i64,
    silo: ContentSilo,
    title: &str,
    minutes: i64,
) -> i64 {
    sqlx::query(
        r#"INSERT INTO collegewise_content (title, content, silos, college_id, created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(title)
    .bind(format!("{} body", title))
    .bind(silo.as_str())
    .bind(college_id)
    .bind(base_time())
    .bind(at(minutes))
    .execute(sqlite(pool))
    .await
    .expect("Failed to insert content")
    .last_insert_rowid()
}

/// Insert an article created `minutes` after the base time
pub async fn insert_article(
    pool: &DynDatabasePool,
    title: &str,
    content: &str,
    silo: ArticleSilo,
    minutes: i64,
) -> i64 {
    sqlx::query(
        "INSERT INTO articles (title, content, silos, meta_desc, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind(content)
    .bind(silo.as_str())
    .bind(format!("About {}", title))
    .bind(at(minutes))
    .bind(at(minutes))
    .execute(sqlite(pool))
    .await
    .expect("Failed to insert article")
    .last_insert_rowid()
}
