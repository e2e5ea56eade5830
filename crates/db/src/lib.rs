//! Persistence layer for media assets, packages and their recipients.
//!
//! - [`models`] -- typed row structs and DTOs, decoded once at this boundary.
//! - [`repositories`] -- zero-sized repo structs over `&PgPool`.
//! - [`store`] -- the [`MediaStore`] trait injected into every component,
//!   with its Postgres implementation [`PgMediaStore`].
//! - [`memory`] -- an in-memory [`MediaStore`] for tests and local runs.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use store::{MediaStore, PgMediaStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
