//! Integration tests for database initialization

use paxreg_common::db::models::{parse_birthdate, NewPassenger};
use paxreg_common::db::{self, passengers};

fn sample() -> NewPassenger {
    NewPassenger {
        name: "Joao da Silva".to_string(),
        cpf: "27036343826".to_string(),
        birthdate: parse_birthdate("1974-10-05T00:00:00").unwrap(),
        flight: "TAM-1234".to_string(),
    }
}

#[tokio::test]
async fn test_init_creates_database_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("paxreg.db");

    let pool = db::init_database(&db_path).await.expect("Init failed");
    assert!(db_path.exists());

    passengers::insert_passenger(&pool, &sample())
        .await
        .expect("Insert failed");
    pool.close().await;
}

#[tokio::test]
async fn test_init_creates_parent_directory() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("nested/data/paxreg.db");

    let pool = db::init_database(&db_path).await.expect("Init failed");
    assert!(db_path.exists());
    pool.close().await;
}

#[tokio::test]
async fn test_init_is_idempotent_and_data_survives_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("paxreg.db");

    let pool = db::init_database(&db_path).await.expect("Init failed");
    passengers::insert_passenger(&pool, &sample())
        .await
        .expect("Insert failed");
    pool.close().await;

    let pool = db::init_database(&db_path).await.expect("Re-init failed");
    let found = passengers::find_by_cpf(&pool, "27036343826")
        .await
        .expect("Lookup failed");
    assert!(found.is_some(), "Row should survive a reopen");
    pool.close().await;
}

#[tokio::test]
async fn test_foreign_keys_enforced_after_init() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("paxreg.db");

    let pool = db::init_database(&db_path).await.expect("Init failed");

    let result = paxreg_common::db::contacts::add_contact(&pool, 123, "000", "celular").await;
    assert!(result.is_err(), "Contact without passenger must be rejected");
    pool.close().await;
}
