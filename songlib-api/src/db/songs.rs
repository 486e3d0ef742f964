//! SQLite implementation of the song repository

use async_trait::async_trait;
use songlib_common::{Error, Result, Song, SongFilter};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use super::SongRepository;
use crate::pagination::{verse_page, PageRequest};

const SELECT_SONGS: &str = r#"SELECT id, "group", song, release_date, text, link FROM songs"#;

/// Song repository backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteSongRepository {
    pool: SqlitePool,
}

impl SqliteSongRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Build the listing query
///
/// Present filter fields become equality predicates joined with `AND`;
/// `WHERE` is only emitted when there is at least one.
fn list_query(filter: &SongFilter, page: PageRequest) -> QueryBuilder<'static, Sqlite> {
    let mut predicates: Vec<(&str, String)> = Vec::new();
    if let Some(group) = &filter.group {
        predicates.push((r#""group""#, group.clone()));
    }
    if let Some(song) = &filter.song {
        predicates.push(("song", song.clone()));
    }

    let mut builder = QueryBuilder::new(SELECT_SONGS);
    for (i, (column, value)) in predicates.into_iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(column).push(" = ").push_bind(value);
    }

    builder
        .push(" ORDER BY id LIMIT ")
        .push_bind(i64::from(page.limit()))
        .push(" OFFSET ")
        .push_bind(page.offset());

    builder
}

#[async_trait]
impl SongRepository for SqliteSongRepository {
    async fn list_songs(&self, filter: &SongFilter, page: PageRequest) -> Result<Vec<Song>> {
        let mut query = list_query(filter, page);
        debug!(
            query = query.sql(),
            group = ?filter.group,
            song = ?filter.song,
            "Executing SQL query"
        );

        let songs = query
            .build_query_as::<Song>()
            .fetch_all(&self.pool)
            .await?;

        Ok(songs)
    }

    async fn lyrics_page(&self, id: i64, page: PageRequest) -> Result<String> {
        let query = "SELECT text FROM songs WHERE id = ?";
        debug!(query, id, "Executing SQL query");

        let text = sqlx::query_scalar::<_, String>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Song not found".to_string()))?;

        Ok(verse_page(&text, page))
    }

    async fn delete_song(&self, id: i64) -> Result<()> {
        let query = "DELETE FROM songs WHERE id = ?";
        debug!(query, id, "Executing SQL query");

        sqlx::query(query).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn update_song(&self, song: &Song) -> Result<()> {
        let query = r#"
            UPDATE songs
            SET "group" = ?, song = ?, release_date = ?, text = ?, link = ?
            WHERE id = ?
        "#;
        debug!(query, id = song.id, "Executing SQL query");

        sqlx::query(query)
            .bind(&song.group)
            .bind(&song.song)
            .bind(&song.release_date)
            .bind(&song.text)
            .bind(&song.link)
            .bind(song.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn add_song(&self, mut song: Song) -> Result<Song> {
        let query = r#"
            INSERT INTO songs ("group", song, release_date, text, link)
            VALUES (?, ?, ?, ?, ?)
        "#;
        debug!(query, "Executing SQL query");

        let result = sqlx::query(query)
            .bind(&song.group)
            .bind(&song.song)
            .bind(&song.release_date)
            .bind(&song.text)
            .bind(&song.link)
            .execute(&self.pool)
            .await?;

        song.id = result.last_insert_rowid();
        Ok(song)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
