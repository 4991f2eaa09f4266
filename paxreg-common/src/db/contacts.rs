//! Contact database operations
//!
//! Contacts are only ever created by attaching them to an existing
//! passenger; they are never updated or deleted on their own. Removal
//! happens through the passenger-delete cascade.

use crate::db::models::Contact;
use crate::Result;
use sqlx::{Row, SqlitePool};

/// Append a contact to a passenger's collection
pub async fn add_contact(
    pool: &SqlitePool,
    passenger_id: i64,
    phone: &str,
    kind: &str,
) -> Result<Contact> {
    let result = sqlx::query(
        r#"
        INSERT INTO contacts (passenger_id, phone, type)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(passenger_id)
    .bind(phone)
    .bind(kind)
    .execute(pool)
    .await?;

    Ok(Contact {
        id: result.last_insert_rowid(),
        passenger_id,
        phone: phone.to_string(),
        kind: kind.to_string(),
    })
}

/// Load all contacts owned by a passenger, in insertion order
pub async fn contacts_for_passenger(pool: &SqlitePool, passenger_id: i64) -> Result<Vec<Contact>> {
    let rows = sqlx::query(
        r#"
        SELECT id, passenger_id, phone, type
        FROM contacts
        WHERE passenger_id = ?
        ORDER BY id
        "#,
    )
    .bind(passenger_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Contact {
            id: row.get("id"),
            passenger_id: row.get("passenger_id"),
            phone: row.get("phone"),
            kind: row.get("type"),
        })
        .collect())
}

/// Count contact rows (test support)
pub async fn count_contacts(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
