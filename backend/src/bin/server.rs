//! CoachTrack HTTP Server Binary
//!
//! This is the main entry point for the CoachTrack REST API server.
//! It builds the repository from configuration, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default)
//! cargo run --bin coachtrack-server
//!
//! # Persist to a JSON file
//! REPOSITORY_TYPE=file COACHTRACK_DATA_FILE=/var/lib/coachtrack/store.json \
//!   cargo run --bin coachtrack-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: `local` or `file` (overrides `coachtrack.toml`)
//! - `COACHTRACK_DATA_FILE`: JSON store location for the file repository
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use coachtrack::db::{RepositoryConfig, RepositoryFactory};
use coachtrack::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting CoachTrack HTTP Server");

    let config = match RepositoryConfig::from_default_location() {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; using defaults", e);
            RepositoryConfig::default()
        }
    }
    .with_env_overrides();

    let repository = RepositoryFactory::from_repository_config(&config)?;
    info!("Repository initialized successfully");

    let state = AppState::new(repository).with_update_policy(config.updates);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
