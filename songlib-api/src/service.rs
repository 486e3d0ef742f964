//! Song service
//!
//! Forwards every operation to the repository unchanged. Kept as its own
//! layer so handlers never depend on the storage technology, and as the
//! holder of the external API base URL.

use std::sync::Arc;

use songlib_common::{Result, Song, SongFilter};

use crate::db::SongRepository;
use crate::pagination::PageRequest;

pub struct SongService {
    repo: Arc<dyn SongRepository>,
    api_url: String,
}

impl SongService {
    pub fn new(repo: Arc<dyn SongRepository>, api_url: impl Into<String>) -> Self {
        Self {
            repo,
            api_url: api_url.into(),
        }
    }

    pub async fn list_songs(&self, filter: &SongFilter, page: PageRequest) -> Result<Vec<Song>> {
        self.repo.list_songs(filter, page).await
    }

    pub async fn lyrics_page(&self, id: i64, page: PageRequest) -> Result<String> {
        self.repo.lyrics_page(id, page).await
    }

    pub async fn delete_song(&self, id: i64) -> Result<()> {
        self.repo.delete_song(id).await
    }

    pub async fn update_song(&self, song: &Song) -> Result<()> {
        self.repo.update_song(song).await
    }

    pub async fn add_song(&self, song: Song) -> Result<Song> {
        self.repo.add_song(song).await
    }

    /// Whether the store answers
    pub async fn ping(&self) -> Result<()> {
        self.repo.ping().await
    }

    /// Base URL of the external song info API
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
