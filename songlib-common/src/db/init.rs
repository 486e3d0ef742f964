//! Database initialization
//!
//! Opens the connection pool and makes sure the `songs` table exists.
//! Table bootstrap only; there is no migration machinery.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Pool size for file-backed databases
pub const MAX_CONNECTIONS: u32 = 10;

/// Connect to the database at `database_url` and create the songs table if needed
///
/// In-memory databases get a single long-lived connection, since every
/// SQLite connection to `:memory:` would otherwise see its own empty database.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if is_memory_url(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?
    };

    // Fail at startup rather than on the first request
    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("Connected to database");

    create_songs_table(&pool).await?;

    Ok(pool)
}

/// Create the `songs` table (idempotent)
///
/// `group` is a reserved word and must stay quoted in every statement.
pub async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            "group" TEXT NOT NULL,
            song TEXT NOT NULL,
            release_date TEXT NOT NULL,
            text TEXT NOT NULL DEFAULT '',
            link TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
