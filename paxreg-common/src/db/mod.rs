//! Database access layer
//!
//! Operations take an explicit `&SqlitePool`; each call acquires a
//! connection from the pool, commits before returning, and releases it.
//! There is no process-wide store handle.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod contacts;
pub mod models;
pub mod passengers;
pub mod schema;

pub use models::{Contact, NewPassenger, Passenger};

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Pragmas set through connect options apply to every pooled
    // connection. Foreign keys are off by default in SQLite and are
    // required for the contacts -> passengers cascade.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    schema::initialize_schema(&pool).await?;

    Ok(pool)
}

/// Open an in-memory database with the schema applied (test support)
///
/// Pinned to a single connection that never expires: every pooled
/// connection to an in-memory SQLite would otherwise see its own empty
/// database.
pub async fn connect_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    schema::initialize_schema(&pool).await?;
    Ok(pool)
}
