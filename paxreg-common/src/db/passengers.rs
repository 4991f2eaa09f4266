//! Passenger database operations
//!
//! Lookup and delete address rows by cpf (the business key); update and
//! contact attachment address rows by the surrogate id, which is what
//! allows the cpf itself to change.

use crate::db::contacts;
use crate::db::models::{parse_birthdate, NewPassenger, Passenger, BIRTHDATE_FORMAT};
use crate::{Error, Result};
use sqlx::{Row, SqlitePool};

/// Insert a new passenger
///
/// A unique violation on cpf surfaces as [`Error::Duplicate`]; any other
/// store failure propagates as a database error. Returns the stored row
/// with its fresh id and an empty contact list.
pub async fn insert_passenger(pool: &SqlitePool, new: &NewPassenger) -> Result<Passenger> {
    let result = sqlx::query(
        r#"
        INSERT INTO passengers (name, cpf, birthdate, flight)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&new.name)
    .bind(&new.cpf)
    .bind(new.birthdate.format(BIRTHDATE_FORMAT).to_string())
    .bind(&new.flight)
    .execute(pool)
    .await;

    let result = match result {
        Ok(result) => result,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(Error::Duplicate(new.cpf.clone()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Passenger {
        id: result.last_insert_rowid(),
        name: new.name.clone(),
        cpf: new.cpf.clone(),
        birthdate: new.birthdate,
        flight: new.flight.clone(),
        contacts: Vec::new(),
    })
}

/// Load all passengers, each with contacts eagerly loaded
pub async fn list_passengers(pool: &SqlitePool) -> Result<Vec<Passenger>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, cpf, birthdate, flight
        FROM passengers
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut passengers = Vec::with_capacity(rows.len());
    for row in rows {
        passengers.push(passenger_from_row(pool, &row).await?);
    }

    Ok(passengers)
}

/// Load a passenger by cpf
pub async fn find_by_cpf(pool: &SqlitePool, cpf: &str) -> Result<Option<Passenger>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, cpf, birthdate, flight
        FROM passengers
        WHERE cpf = ?
        "#,
    )
    .bind(cpf)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(passenger_from_row(pool, &row).await?)),
        None => Ok(None),
    }
}

/// Load a passenger by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Passenger>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, cpf, birthdate, flight
        FROM passengers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(passenger_from_row(pool, &row).await?)),
        None => Ok(None),
    }
}

/// Update a passenger's name, cpf, and flight by id
///
/// Birthdate is intentionally not written here: the stored value is kept
/// as created. Returns the number of rows affected (0 or 1).
pub async fn update_passenger(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    cpf: &str,
    flight: &str,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE passengers
        SET name = ?, cpf = ?, flight = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(cpf)
    .bind(flight)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a passenger by cpf
///
/// Owned contacts are removed by the cascade. Returns the number of rows
/// affected (0 or 1).
pub async fn delete_by_cpf(pool: &SqlitePool, cpf: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM passengers WHERE cpf = ?")
        .bind(cpf)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Count passenger rows (test support)
pub async fn count_passengers(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM passengers")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

async fn passenger_from_row(pool: &SqlitePool, row: &sqlx::sqlite::SqliteRow) -> Result<Passenger> {
    let id: i64 = row.get("id");
    let birthdate_text: String = row.get("birthdate");
    let birthdate = parse_birthdate(&birthdate_text).map_err(|e| {
        Error::Internal(format!(
            "Stored birthdate '{}' is not in the expected format: {}",
            birthdate_text, e
        ))
    })?;

    Ok(Passenger {
        id,
        name: row.get("name"),
        cpf: row.get("cpf"),
        birthdate,
        flight: row.get("flight"),
        contacts: contacts::contacts_for_passenger(pool, id).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;

    fn sample(cpf: &str) -> NewPassenger {
        NewPassenger {
            name: "Joao da Silva".to_string(),
            cpf: cpf.to_string(),
            birthdate: parse_birthdate("1974-10-05T00:00:00").unwrap(),
            flight: "TAM-1234".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_cpf() {
        let pool = connect_memory().await.expect("Failed to open database");

        let inserted = insert_passenger(&pool, &sample("27036343826"))
            .await
            .expect("Failed to insert passenger");
        assert!(inserted.id > 0);
        assert!(inserted.contacts.is_empty());

        let found = find_by_cpf(&pool, "27036343826")
            .await
            .expect("Lookup failed")
            .expect("Passenger not found");
        assert_eq!(found.id, inserted.id);
        assert_eq!(found.name, "Joao da Silva");
        assert_eq!(found.flight, "TAM-1234");
        assert_eq!(
            found.birthdate.format(BIRTHDATE_FORMAT).to_string(),
            "1974-10-05T00:00:00"
        );
        assert!(found.contacts.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_cpf_is_distinct_error_and_leaves_store_unchanged() {
        let pool = connect_memory().await.expect("Failed to open database");

        insert_passenger(&pool, &sample("27036343826"))
            .await
            .expect("First insert should succeed");

        let err = insert_passenger(&pool, &sample("27036343826"))
            .await
            .expect_err("Second insert should fail");
        assert!(matches!(err, Error::Duplicate(ref cpf) if cpf == "27036343826"));

        let count = count_passengers(&pool).await.expect("Count failed");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_find_by_cpf_missing() {
        let pool = connect_memory().await.expect("Failed to open database");
        let found = find_by_cpf(&pool, "00000000000").await.expect("Lookup failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_changes_cpf() {
        let pool = connect_memory().await.expect("Failed to open database");
        let inserted = insert_passenger(&pool, &sample("27036343826"))
            .await
            .expect("Insert failed");

        let affected = update_passenger(&pool, inserted.id, "Joao da Silva", "71454597011", "GOL-4321")
            .await
            .expect("Update failed");
        assert_eq!(affected, 1);

        assert!(find_by_cpf(&pool, "27036343826")
            .await
            .expect("Lookup failed")
            .is_none());

        let updated = find_by_cpf(&pool, "71454597011")
            .await
            .expect("Lookup failed")
            .expect("Updated passenger not found");
        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.flight, "GOL-4321");
    }

    #[tokio::test]
    async fn test_update_does_not_touch_birthdate() {
        let pool = connect_memory().await.expect("Failed to open database");
        let inserted = insert_passenger(&pool, &sample("27036343826"))
            .await
            .expect("Insert failed");

        update_passenger(&pool, inserted.id, "Joao", "27036343826", "TAM-1234")
            .await
            .expect("Update failed");

        let after = find_by_id(&pool, inserted.id)
            .await
            .expect("Lookup failed")
            .expect("Passenger not found");
        assert_eq!(after.birthdate, inserted.birthdate);
    }

    #[tokio::test]
    async fn test_update_unknown_id_affects_zero_rows() {
        let pool = connect_memory().await.expect("Failed to open database");
        let affected = update_passenger(&pool, 9999, "Nobody", "00000000000", "XX-0000")
            .await
            .expect("Update failed");
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_delete_by_cpf() {
        let pool = connect_memory().await.expect("Failed to open database");
        insert_passenger(&pool, &sample("27036343826"))
            .await
            .expect("Insert failed");

        let affected = delete_by_cpf(&pool, "27036343826").await.expect("Delete failed");
        assert_eq!(affected, 1);

        let affected = delete_by_cpf(&pool, "27036343826").await.expect("Delete failed");
        assert_eq!(affected, 0);
    }
}
