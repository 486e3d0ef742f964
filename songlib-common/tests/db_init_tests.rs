//! Tests for database initialization
//!
//! - Database file is created when missing
//! - Songs table survives reopening an existing database
//! - An unreachable database is an error

use songlib_common::db::init_database;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("songs.db");
    assert!(!db_path.exists());

    let url = format!("sqlite://{}", db_path.display());
    let pool = init_database(&url).await;

    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("songs.db").display());

    let pool = init_database(&url).await.unwrap();
    sqlx::query(
        r#"INSERT INTO songs ("group", song, release_date) VALUES ('Muse', 'Uprising', '16.07.2006')"#,
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    let pool = init_database(&url).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_unreachable_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("missing").join("songs.db").display());

    let result = init_database(&url).await;
    assert!(result.is_err(), "Opening a database in a missing directory should fail");
}
