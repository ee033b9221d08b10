//! Database layer
//!
//! The catalog runs on either backend:
//! - SQLite (default, single-file deployment)
//! - MySQL (shared deployments)
//!
//! The driver is selected from configuration. Everything above this module
//! talks to the `DatabasePool` trait and never names a backend directly;
//! repositories borrow the concrete pool through [`DatabasePool::backend`]
//! when they run queries.
//!
//! # Usage
//!
//! ```ignore
//! use college_catalog::config::DatabaseConfig;
//! use college_catalog::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, Backend, DatabasePool, DynDatabasePool, MysqlDatabase,
    SqliteDatabase,
};
