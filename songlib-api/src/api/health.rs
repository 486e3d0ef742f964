//! Health check that also pings the songs store

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// `ok` or `unavailable`
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Store answered a trivial query
    pub database: bool,
}

/// GET /health
///
/// 200 while the store answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let database = match state.service.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check: store unavailable: {}", e);
            false
        }
    };

    let (code, status) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        code,
        Json(HealthStatus {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
