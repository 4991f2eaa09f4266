//! Database schema
//!
//! Two tables: passengers (cpf unique) and contacts (foreign-keyed to
//! passengers with cascading delete). `initialize_schema` is idempotent and
//! is also called directly by tests against `sqlite::memory:`.

use crate::Result;
use sqlx::SqlitePool;

/// Create all tables if they do not exist
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    create_passengers_table(pool).await?;
    create_contacts_table(pool).await?;
    Ok(())
}

async fn create_passengers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS passengers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            cpf TEXT NOT NULL UNIQUE,
            birthdate TEXT NOT NULL,
            flight TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_contacts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            passenger_id INTEGER NOT NULL
                REFERENCES passengers(id) ON DELETE CASCADE,
            phone TEXT NOT NULL,
            type TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
