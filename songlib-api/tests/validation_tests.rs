//! Input validation happens before any store access
//!
//! The router is wired to a repository that panics on every call, so a
//! passing test proves the request was rejected in the handler.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use songlib_api::db::SongRepository;
use songlib_api::pagination::PageRequest;
use songlib_api::service::SongService;
use songlib_api::{build_router, AppState};
use songlib_common::{Error, Result, Song, SongFilter};
use tower::util::ServiceExt;

/// Repository double that fails the test if reached
struct UnreachableRepository;

#[async_trait]
impl SongRepository for UnreachableRepository {
    async fn list_songs(&self, _: &SongFilter, _: PageRequest) -> Result<Vec<Song>> {
        panic!("list_songs must not be called");
    }

    async fn lyrics_page(&self, _: i64, _: PageRequest) -> Result<String> {
        panic!("lyrics_page must not be called");
    }

    async fn delete_song(&self, _: i64) -> Result<()> {
        panic!("delete_song must not be called");
    }

    async fn update_song(&self, _: &Song) -> Result<()> {
        panic!("update_song must not be called");
    }

    async fn add_song(&self, _: Song) -> Result<Song> {
        panic!("add_song must not be called");
    }

    async fn ping(&self) -> Result<()> {
        panic!("ping must not be called");
    }
}

/// Repository double whose store is always down
struct BrokenRepository;

#[async_trait]
impl SongRepository for BrokenRepository {
    async fn list_songs(&self, _: &SongFilter, _: PageRequest) -> Result<Vec<Song>> {
        Err(Error::Database(sqlx::Error::PoolTimedOut))
    }

    async fn lyrics_page(&self, _: i64, _: PageRequest) -> Result<String> {
        Err(Error::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete_song(&self, _: i64) -> Result<()> {
        Err(Error::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update_song(&self, _: &Song) -> Result<()> {
        Err(Error::Database(sqlx::Error::PoolTimedOut))
    }

    async fn add_song(&self, _: Song) -> Result<Song> {
        Err(Error::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<()> {
        Err(Error::Database(sqlx::Error::PoolTimedOut))
    }
}

fn app_with(repo: Arc<dyn SongRepository>) -> Router {
    build_router(AppState::new(SongService::new(repo, "")))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).expect("Should parse JSON"))
}

#[tokio::test]
async fn test_invalid_input_never_reaches_store() {
    let app = app_with(Arc::new(UnreachableRepository));

    let cases: [(&str, &str, Option<&str>); 15] = [
        ("GET", "/songs?page=0", None),
        ("GET", "/songs?page=-1", None),
        ("GET", "/songs?limit=0", None),
        ("GET", "/songs?limit=ten", None),
        ("GET", "/songs/abc/lyrics", None),
        ("GET", "/songs/0/lyrics", None),
        ("GET", "/songs/1/lyrics?page=0", None),
        ("GET", "/songs/1/lyrics?limit=-5", None),
        ("DELETE", "/songs/abc", None),
        ("PUT", "/songs/abc", Some(r#"{"group":"G","song":"S"}"#)),
        ("PUT", "/songs/1", Some("{broken")),
        ("PUT", "/songs/1", Some(r#"{"link":"x"}"#)),
        ("POST", "/songs", Some("{broken")),
        ("POST", "/songs", Some(r#"{"group":"","song":"S"}"#)),
        ("POST", "/songs", Some(r#"{"group":"G","song":""}"#)),
    ];

    for (method, uri, body) in cases {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert!(response["error"].is_string(), "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let app = app_with(Arc::new(BrokenRepository));

    let cases = [
        ("GET", "/songs", None, "Failed to get songs"),
        ("GET", "/songs/1/lyrics", None, "Failed to get lyrics"),
        ("DELETE", "/songs/1", None, "Failed to delete song"),
        ("PUT", "/songs/1", Some(r#"{"group":"G","song":"S"}"#), "Failed to update song"),
        ("POST", "/songs", Some(r#"{"group":"G","song":"S"}"#), "Failed to add song"),
    ];

    for (method, uri, body, message) in cases {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(response, serde_json::json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_health_reports_unavailable_store() {
    let app = app_with(Arc::new(BrokenRepository));

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["database"], false);
}

#[test]
fn test_service_exposes_api_url() {
    let service = SongService::new(Arc::new(UnreachableRepository), "https://info.example/api");
    assert_eq!(service.api_url(), "https://info.example/api");
}
