//! songlib-api - songs CRUD HTTP service
//!
//! Startup: resolve configuration, open the database, wire
//! repository → service → handlers, serve until Ctrl+C or SIGTERM.
//! Any startup failure is fatal.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use songlib_api::{build_router, AppState};
use songlib_common::config::{ConfigOverrides, ServiceConfig};
use songlib_common::db::init_database;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for songlib-api
#[derive(Parser, Debug)]
#[command(name = "songlib-api")]
#[command(about = "Songs CRUD HTTP API")]
#[command(version)]
struct Args {
    /// Env file of KEY=value lines (defaults to ./.env when present)
    #[arg(long, env = "SONGLIB_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// TOML config file (defaults to ./songlib.toml when present)
    #[arg(short, long, env = "SONGLIB_CONFIG")]
    config: Option<PathBuf>,

    /// Database connection string, e.g. sqlite://songs.db
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Base URL of the external song info API
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SONGLIB_PORT")]
    port: Option<u16>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            env_file: args.env_file,
            config_file: args.config,
            database_url: args.database_url,
            api_url: args.api_url,
            port: args.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songlib_api=info,songlib_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting songlib-api v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config =
        ServiceConfig::resolve(args.into()).context("Failed to load configuration")?;

    let pool = init_database(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let state = AppState::with_pool(pool.clone(), config.api_url.clone());
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("songlib-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
