//! AAS + DPP Server
//!
//! Serves one Asset Administration Shell record from a JSON file, its
//! Digital Product Passport projection, HTML views, and QR codes.
//!
//! # Configuration
//!
//! Environment variables:
//! - `AAS_DPP_PORT`: Port to listen on (default: 8000)
//! - `AAS_DPP_DATA_DIR`: Directory holding `aas_<id>.json` (default: ~/.local/share/aas-dpp)
//! - `AAS_DPP_PUBLIC_BASE_URL`: Base URL for absolute links (default: http://localhost:8000)
//! - `AAS_DPP_API_KEY`: Shared secret for write endpoints (default: unset, writes open)
//! - `AAS_DPP_ASSET_ID`: Id of the managed asset (default: 1)
//! - `AAS_DPP_CONFIG`: Path to config file (default: ~/.config/aas-dpp/config.yaml)
//!
//! # Config File Format
//!
//! ```yaml
//! port: 8000
//! data_dir: ./data
//! public_base_url: "https://aas.example.com"
//! api_key: "your-secret-key-here"
//! ```

use aas_dpp::server::{self, AppState};
use aas_dpp::Config;
use aas_dpp_core::JsonFileStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aas_dpp=info,aas_dpp_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load(None)?;

    let store = JsonFileStore::new(&config.data_dir.value, &config.asset_id.value)?;

    tracing::info!("AAS record file: {}", store.path().display());
    tracing::info!("Public base URL: {}", config.public_base_url.value);
    if config.api_key.value.is_none() {
        tracing::warn!("No API key configured - write endpoints are open");
    }

    let state = AppState::new(
        Arc::new(store),
        &config.public_base_url.value,
        config.api_key.value.as_deref(),
    )?;
    let app = server::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port.value));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
