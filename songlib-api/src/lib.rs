//! songlib-api library - songs CRUD service
//!
//! Layers, outermost first: axum handlers ([`api`]) → [`service::SongService`]
//! → [`db::SongRepository`]. Each layer receives the next one at construction.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod pagination;
pub mod service;

pub use error::{ApiError, ApiResult};

use db::{SongRepository, SqliteSongRepository};
use service::SongService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SongService>,
}

impl AppState {
    /// Create state around an existing service
    pub fn new(service: SongService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Wire the SQLite repository and service over `pool`
    pub fn with_pool(pool: SqlitePool, api_url: impl Into<String>) -> Self {
        let repo: Arc<dyn SongRepository> = Arc::new(SqliteSongRepository::new(pool));
        Self::new(SongService::new(repo, api_url))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::song_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
