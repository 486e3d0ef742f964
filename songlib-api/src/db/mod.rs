//! Song persistence
//!
//! `SongRepository` is the seam between the service and the store; the
//! SQLite implementation lives in [`songs`].

use async_trait::async_trait;
use songlib_common::{Result, Song, SongFilter};

use crate::pagination::PageRequest;

mod songs;
pub use songs::SqliteSongRepository;

/// Storage operations on the `songs` table
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// One page of songs matching `filter`, ordered by id
    async fn list_songs(&self, filter: &SongFilter, page: PageRequest) -> Result<Vec<Song>>;

    /// One page of verse blocks from the lyrics of song `id`
    ///
    /// Fails with `Error::NotFound` when the song does not exist; a page past
    /// the last verse is an empty string.
    async fn lyrics_page(&self, id: i64, page: PageRequest) -> Result<String>;

    /// Delete song `id`; deleting a missing song is not an error
    async fn delete_song(&self, id: i64) -> Result<()>;

    /// Replace every field of song `song.id`; a missing song is not an error
    async fn update_song(&self, song: &Song) -> Result<()>;

    /// Insert `song`, returning it with the generated id
    async fn add_song(&self, song: Song) -> Result<Song>;

    /// Round-trip to the store
    async fn ping(&self) -> Result<()>;
}
