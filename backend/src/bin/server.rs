//! TELLAR HTTP Server Binary
//!
//! This is the main entry point for the TELLAR REST API server.
//! It loads configuration, creates the record source, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Seeded demo data (default)
//! TELLAR_SEED=42 cargo run --bin tellar-server
//!
//! # Live PocketBase collection
//! TELLAR_SOURCE=pocketbase POCKETBASE_URL=http://127.0.0.1:8090 \
//!   cargo run --bin tellar-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `TELLAR_CONFIG`: Path to a `tellar.toml` (default: searched)
//! - `TELLAR_SOURCE`: `local`, `synthetic` or `pocketbase`
//! - `TELLAR_SEED`: Seed for demo data and fallback values
//! - `POCKETBASE_URL` / `POCKETBASE_COLLECTION`: Remote collection
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tellar::db::TellarConfig;
use tellar::http::{create_router, AppState};

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

    info!("Starting TELLAR HTTP Server");

    let config = TellarConfig::load()?;
    let state = AppState::from_config(&config)?;
    info!(
        "Record source '{}' initialized (seed: {:?})",
        state.source.name(),
        config.source.seed
    );

    // Warm the cache so the first page load does not pay for the fetch.
    let snapshot = state.snapshot().await?;
    if snapshot.is_empty() {
        warn!("Record source returned no records; dashboard will be empty");
    } else {
        info!("Loaded {} records (snapshot {})", snapshot.len(), snapshot.fingerprint);
    }

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
