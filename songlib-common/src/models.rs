//! Song model

use serde::{Deserialize, Serialize};

use crate::time::today_release_date;

/// A row of the `songs` table
///
/// Also the JSON shape of request and response bodies. Missing fields in a
/// request body deserialize to empty values so handlers can apply defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Song {
    /// Generated by the store on insert
    pub id: i64,
    /// Performing group or artist
    pub group: String,
    /// Song title
    pub song: String,
    /// `DD.MM.YYYY`
    pub release_date: String,
    /// Lyrics, verses separated by a blank line
    pub text: String,
    pub link: String,
}

impl Song {
    /// Substitute today's date when no release date was supplied
    pub fn with_default_release_date(mut self) -> Self {
        if self.release_date.is_empty() {
            self.release_date = today_release_date();
        }
        self
    }

    /// Group and title are both present
    pub fn has_required_fields(&self) -> bool {
        !self.group.is_empty() && !self.song.is_empty()
    }
}

/// Equality constraints narrowing a song listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
}

impl SongFilter {
    /// Build a filter from raw query values, treating empty strings as absent
    pub fn from_query(group: Option<String>, song: Option<String>) -> Self {
        Self {
            group: group.filter(|g| !g.is_empty()),
            song: song.filter(|s| !s.is_empty()),
        }
    }
}
