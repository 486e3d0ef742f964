//! Song endpoints
//!
//! Every handler validates its id, pagination and body before touching the
//! service, so invalid input never reaches the store.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use songlib_common::{Song, SongFilter};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::pagination::{parse_id, PageRequest};
use crate::AppState;

/// Query parameters for GET /songs
#[derive(Debug, Default, Deserialize)]
pub struct ListSongsQuery {
    pub group: Option<String>,
    pub song: Option<String>,
    /// Kept as text so bad values get a descriptive 400
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters for GET /songs/:id/lyrics
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `{"songs": [...]}`
#[derive(Debug, Serialize)]
pub struct SongListResponse {
    pub songs: Vec<Song>,
}

/// `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn invalid_query(rejection: QueryRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

/// Decode a song body and check it carries a group and title
///
/// The body is read as JSON whatever its `content-type` says.
fn parse_song(body: &[u8]) -> ApiResult<Song> {
    let song: Song = serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected song body: {}", e);
        ApiError::BadRequest("Invalid song".to_string())
    })?;

    if !song.has_required_fields() {
        return Err(ApiError::BadRequest(
            "Invalid song: group and song are required".to_string(),
        ));
    }

    Ok(song)
}

/// GET /songs
///
/// Optional `group`/`song` equality filters, `page` (default 1) and
/// `limit` (default 10).
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<ListSongsQuery>, QueryRejection>,
) -> ApiResult<Json<SongListResponse>> {
    let Query(query) = query.map_err(invalid_query)?;
    let page = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref())?;
    let filter = SongFilter::from_query(query.group, query.song);

    let songs = state
        .service
        .list_songs(&filter, page)
        .await
        .map_err(|e| ApiError::store("Failed to get songs", e))?;

    info!(count = songs.len(), "Songs retrieved successfully");

    Ok(Json(SongListResponse { songs }))
}

/// GET /songs/:id/lyrics
///
/// One page of verse blocks; a page past the last verse is an empty message.
pub async fn get_lyrics(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let Query(query) = query.map_err(invalid_query)?;
    let page = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref())?;

    let lyrics = state
        .service
        .lyrics_page(id, page)
        .await
        .map_err(|e| ApiError::store("Failed to get lyrics", e))?;

    Ok(Json(MessageResponse::new(lyrics)))
}

/// DELETE /songs/:id
///
/// Succeeds whether or not the song existed.
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    state
        .service
        .delete_song(id)
        .await
        .map_err(|e| ApiError::store("Failed to delete song", e))?;

    info!(id, "Song deleted");

    Ok(Json(MessageResponse::new("song deleted")))
}

/// PUT /songs/:id
///
/// Full replace. The path id wins over any id in the body; `group` and
/// `song` are required as on create.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Song>> {
    let id = parse_id(&id)?;
    let mut song = parse_song(&body)?;
    song.id = id;
    let song = song.with_default_release_date();

    state
        .service
        .update_song(&song)
        .await
        .map_err(|e| ApiError::store("Failed to update song", e))?;

    info!(id, "Song updated");

    Ok(Json(song))
}

/// POST /songs
///
/// `group` and `song` are required; any id in the body is ignored.
pub async fn add_song(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Song>> {
    let song = parse_song(&body)?;

    let created = state
        .service
        .add_song(song.with_default_release_date())
        .await
        .map_err(|e| ApiError::store("Failed to add song", e))?;

    info!(id = created.id, "Song added");

    Ok(Json(created))
}

/// Build song routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(list_songs).post(add_song))
        .route("/songs/:id", put(update_song).delete(delete_song))
        .route("/songs/:id/lyrics", get(get_lyrics))
}
