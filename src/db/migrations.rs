//! Embedded schema migrations
//!
//! Migrations live in code as SQL strings with one variant per backend, so
//! the binary can bring up an empty SQLite file or MySQL schema on its own.
//! Applied versions are recorded in the `_migrations` table.
//!
//! ```ignore
//! let pool = create_pool(&config).await?;
//! migrations::run_migrations(&pool).await?;
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use super::{Backend, DynDatabasePool};
use crate::config::DatabaseDriver;

/// A database migration with SQL for both SQLite and MySQL
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (must be unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements for SQLite
    pub up_sqlite: &'static str,
    /// SQL statements for MySQL
    pub up_mysql: &'static str,
}

/// Migration record stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_reference_tables",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS countries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS states (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS cities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS streams (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS countries (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(100) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS states (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(100) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS cities (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(100) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS streams (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(100) NOT NULL,
                slug VARCHAR(100) NOT NULL UNIQUE
            );
        "#,
    },
    Migration {
        version: 2,
        name: "create_colleges",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS colleges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                college_name VARCHAR(255) NOT NULL,
                location VARCHAR(255) NOT NULL,
                established TIMESTAMP,
                email VARCHAR(255),
                contact VARCHAR(50),
                logo_url TEXT,
                bg_url TEXT,
                media_url TEXT,
                rating REAL,
                score INTEGER NOT NULL DEFAULT 0,
                intake_start_date TIMESTAMP,
                pr_pathway BOOLEAN NOT NULL DEFAULT 0,
                slug VARCHAR(255) NOT NULL UNIQUE,
                total_students INTEGER,
                acceptance_rate REAL,
                international_student_rate REAL,
                brochure_url TEXT,
                avg_fees_in_aud REAL,
                stream_id INTEGER,
                city_id INTEGER,
                state_id INTEGER,
                country_id INTEGER,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (stream_id) REFERENCES streams(id) ON DELETE SET NULL,
                FOREIGN KEY (city_id) REFERENCES cities(id) ON DELETE SET NULL,
                FOREIGN KEY (state_id) REFERENCES states(id) ON DELETE SET NULL,
                FOREIGN KEY (country_id) REFERENCES countries(id) ON DELETE SET NULL
            );
            CREATE INDEX IF NOT EXISTS idx_colleges_score ON colleges(score);
            CREATE INDEX IF NOT EXISTS idx_colleges_stream_id ON colleges(stream_id);
            CREATE INDEX IF NOT EXISTS idx_colleges_city_id ON colleges(city_id);
            CREATE INDEX IF NOT EXISTS idx_colleges_state_id ON colleges(state_id);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS colleges (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                college_name VARCHAR(255) NOT NULL,
                location VARCHAR(255) NOT NULL,
                established TIMESTAMP NULL,
                email VARCHAR(255),
                contact VARCHAR(50),
                logo_url TEXT,
                bg_url TEXT,
                media_url TEXT,
                rating DOUBLE,
                score BIGINT NOT NULL DEFAULT 0,
                intake_start_date TIMESTAMP NULL,
                pr_pathway BOOLEAN NOT NULL DEFAULT FALSE,
                slug VARCHAR(255) NOT NULL UNIQUE,
                total_students BIGINT,
                acceptance_rate DOUBLE,
                international_student_rate DOUBLE,
                brochure_url TEXT,
                avg_fees_in_aud DOUBLE,
                stream_id BIGINT,
                city_id BIGINT,
                state_id BIGINT,
                country_id BIGINT,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
                FOREIGN KEY (stream_id) REFERENCES streams(id) ON DELETE SET NULL,
                FOREIGN KEY (city_id) REFERENCES cities(id) ON DELETE SET NULL,
                FOREIGN KEY (state_id) REFERENCES states(id) ON DELETE SET NULL,
                FOREIGN KEY (country_id) REFERENCES countries(id) ON DELETE SET NULL
            );
            CREATE INDEX idx_colleges_score ON colleges(score);
        "#,
    },
    Migration {
        version: 3,
        name: "create_courses",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS courses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                course_name VARCHAR(255) NOT NULL,
                duration_in_months INTEGER NOT NULL,
                rating REAL,
                score INTEGER NOT NULL DEFAULT 0,
                stream_id INTEGER,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (stream_id) REFERENCES streams(id) ON DELETE SET NULL
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS courses (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                course_name VARCHAR(255) NOT NULL,
                duration_in_months BIGINT NOT NULL,
                rating DOUBLE,
                score BIGINT NOT NULL DEFAULT 0,
                stream_id BIGINT,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
                FOREIGN KEY (stream_id) REFERENCES streams(id) ON DELETE SET NULL
            );
        "#,
    },
    Migration {
        version: 4,
        name: "create_college_courses",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS college_courses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                duration_in_months INTEGER NOT NULL,
                tuition_fees REAL NOT NULL DEFAULT 0,
                hostel_fees REAL NOT NULL DEFAULT 0,
                one_time_fees REAL NOT NULL DEFAULT 0,
                other_fees TEXT,
                college_id INTEGER NOT NULL,
                course_id INTEGER NOT NULL,
                stream_id INTEGER,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (college_id) REFERENCES colleges(id) ON DELETE CASCADE,
                FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE,
                FOREIGN KEY (stream_id) REFERENCES streams(id) ON DELETE SET NULL
            );
            CREATE INDEX IF NOT EXISTS idx_college_courses_college_id ON college_courses(college_id);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS college_courses (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(255) NOT NULL,
                duration_in_months BIGINT NOT NULL,
                tuition_fees DOUBLE NOT NULL DEFAULT 0,
                hostel_fees DOUBLE NOT NULL DEFAULT 0,
                one_time_fees DOUBLE NOT NULL DEFAULT 0,
                other_fees TEXT,
                college_id BIGINT NOT NULL,
                course_id BIGINT NOT NULL,
                stream_id BIGINT,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
                FOREIGN KEY (college_id) REFERENCES colleges(id) ON DELETE CASCADE,
                FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE,
                FOREIGN KEY (stream_id) REFERENCES streams(id) ON DELETE SET NULL
            );
        "#,
    },
    Migration {
        version: 5,
        name: "create_collegewise_content",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS collegewise_content (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(255) NOT NULL,
                content TEXT NOT NULL,
                silos VARCHAR(20) NOT NULL,
                college_id INTEGER NOT NULL,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (college_id) REFERENCES colleges(id) ON DELETE CASCADE,
                CHECK (silos IN ('info', 'course', 'fees', 'scholarship', 'placement', 'faq'))
            );
            CREATE INDEX IF NOT EXISTS idx_collegewise_content_college_silos ON collegewise_content(college_id, silos);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS collegewise_content (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                title VARCHAR(255) NOT NULL,
                content LONGTEXT NOT NULL,
                silos VARCHAR(20) NOT NULL,
                college_id BIGINT NOT NULL,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
                FOREIGN KEY (college_id) REFERENCES colleges(id) ON DELETE CASCADE
            );
            CREATE INDEX idx_collegewise_content_college_silos ON collegewise_content(college_id, silos);
        "#,
    },
    Migration {
        version: 6,
        name: "create_articles",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(255) NOT NULL,
                content TEXT NOT NULL,
                silos VARCHAR(20) NOT NULL,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CHECK (silos IN ('news', 'exam', 'course', 'blog'))
            );
            CREATE INDEX IF NOT EXISTS idx_articles_silos ON articles(silos);
            CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles(created_at);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS articles (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                title VARCHAR(255) NOT NULL,
                content LONGTEXT NOT NULL,
                silos VARCHAR(20) NOT NULL,
                meta_desc TEXT,
                og_img TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
            );
            CREATE INDEX idx_articles_silos ON articles(silos);
            CREATE INDEX idx_articles_created_at ON articles(created_at);
        "#,
    },
    Migration {
        version: 7,
        name: "create_lead_forms",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS lead_forms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL,
                phn_no VARCHAR(50) NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_lead_forms_created_at ON lead_forms(created_at);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS lead_forms (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL,
                phn_no VARCHAR(50) NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
            );
            CREATE INDEX idx_lead_forms_created_at ON lead_forms(created_at);
        "#,
    },
    Migration {
        version: 8,
        name: "create_subscriptions",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS subscriptions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255),
                email VARCHAR(255) NOT NULL UNIQUE,
                phn_no VARCHAR(50),
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS subscriptions (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(255),
                email VARCHAR(255) NOT NULL UNIQUE,
                phn_no VARCHAR(50),
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
    },
    Migration {
        version: 9,
        name: "create_contact_messages",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS contact_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL,
                phn_no VARCHAR(50),
                message TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS contact_messages (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL,
                phn_no VARCHAR(50),
                message TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
    },
];

/// Run all pending migrations in version order
///
/// Returns the number of migrations applied by this call.
pub async fn run_migrations(pool: &DynDatabasePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied: Vec<i64> = get_applied_migrations(pool)
        .await?
        .iter()
        .map(|m| m.version)
        .collect();

    let mut count = 0;
    for migration in MIGRATIONS {
        if applied.contains(&i64::from(migration.version)) {
            continue;
        }
        tracing::info!("Applying migration {}: {}", migration.version, migration.name);
        apply_migration(pool, migration)
            .await
            .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
        count += 1;
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

async fn create_migrations_table(pool: &DynDatabasePool) -> Result<()> {
    let sql = match pool.driver() {
        DatabaseDriver::Sqlite => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
        DatabaseDriver::Mysql => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
    };

    pool.execute(sql).await?;
    Ok(())
}

async fn get_applied_migrations(pool: &DynDatabasePool) -> Result<Vec<MigrationRecord>> {
    const SQL: &str = "SELECT version, name, applied_at FROM _migrations ORDER BY version";
    let records = match pool.backend() {
        Backend::Sqlite(p) => sqlx::query_as::<_, MigrationRecord>(SQL).fetch_all(p).await,
        Backend::Mysql(p) => sqlx::query_as::<_, MigrationRecord>(SQL).fetch_all(p).await,
    }
    .context("Failed to read applied migrations")?;
    Ok(records)
}

async fn apply_migration(pool: &DynDatabasePool, migration: &Migration) -> Result<()> {
    const RECORD_SQL: &str = "INSERT INTO _migrations (version, name) VALUES (?, ?)";

    match pool.backend() {
        Backend::Sqlite(p) => {
            for statement in split_sql_statements(migration.up_sqlite) {
                sqlx::query(statement)
                    .execute(p)
                    .await
                    .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
            }
            sqlx::query(RECORD_SQL)
                .bind(i64::from(migration.version))
                .bind(migration.name)
                .execute(p)
                .await?;
        }
        Backend::Mysql(p) => {
            for statement in split_sql_statements(migration.up_mysql) {
                sqlx::query(statement)
                    .execute(p)
                    .await
                    .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
            }
            sqlx::query(RECORD_SQL)
                .bind(i64::from(migration.version))
                .bind(migration.name)
                .execute(p)
                .await?;
        }
    }

    Ok(())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    match sql.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}

/// Split SQL into individual statements, skipping comment-only fragments
fn split_sql_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty() && !is_comment_only(stmt))
        .collect()
}

fn is_comment_only(s: &str) -> bool {
    s.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with("--"))
}
