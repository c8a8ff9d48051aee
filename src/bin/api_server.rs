//! Mock API server entry point.
//!
//! Usage: cargo run --bin api_server

use std::net::SocketAddr;
use std::path::PathBuf;

use greenmap::{create_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "greenmap=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting mock API server...");

    // Configuration from environment variables
    let zones_path = std::env::var("ZONES_GEOJSON")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/planting_zones.geojson"));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    // Optional fixed seed for reproducible mock data
    let seed: Option<u64> = std::env::var("GREENMAP_SEED")
        .ok()
        .and_then(|s| s.parse().ok());

    tracing::info!("Configuration:");
    tracing::info!("  ZONES_GEOJSON: {:?}", zones_path);
    tracing::info!("  PORT: {}", port);
    tracing::info!("  GREENMAP_SEED: {:?}", seed);

    let zones_path = if zones_path.exists() {
        Some(zones_path)
    } else {
        tracing::warn!("Zone seed file {:?} not found", zones_path);
        None
    };

    let state = AppState::new(zones_path.as_deref(), seed)?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
