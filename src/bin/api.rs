//! SeaState API Server
//!
//! Run with: cargo run --bin seastate-api
//!
//! # Configuration
//!
//! Read from the first config file found (see `Config::load_default`), then
//! overridden by environment variables:
//! - `SEASTATE_BACKEND_URL`: Weather backend (default: http://localhost:8000)
//! - `SEASTATE_CITY`, `SEASTATE_LATITUDE`, `SEASTATE_LONGITUDE`: Location
//! - `SEASTATE_FLEET_FILE`: JSON file with the monitored vessels
//! - `SEASTATE_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SEASTATE_API_PORT`: Port to listen on (default: 8083)
//! - `RUST_LOG`: Log filter (default: seastate=info,tower_http=debug)

use anyhow::Context;
use seastate::api::{serve, AppState};
use seastate::backend::BackendClient;
use seastate::config::Config;
use seastate::dashboard::{Dashboard, LogNavigator, LogNotifier};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    seastate::logging::init(&config.logging, "tower_http=debug");

    tracing::info!("Starting SeaState API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Weather backend: {}", config.backend.url);

    let client = BackendClient::new(config.client_config()).context("building HTTP client")?;
    let fleet = config.fleet_source()?;

    let dashboard = Arc::new(
        Dashboard::new(Arc::new(client), config.location.clone())
            .with_fleet(fleet)
            .with_navigator(Arc::new(LogNavigator))
            .with_notifier(Arc::new(LogNotifier)),
    );

    // First load, like the page mount; a failure leaves the view empty and
    // POST /api/v1/dashboard/refresh retries it.
    let outcome = dashboard.fetch_all_data().await;
    tracing::info!(?outcome, "Initial dashboard load finished");

    tracing::info!("Starting server on {}", config.api.addr());
    serve(AppState::new(dashboard), &config.api).await?;

    tracing::info!("SeaState API server stopped");
    Ok(())
}
