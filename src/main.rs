//! SeaState
//!
//! Fetches the dashboard once, the way the front end does on mount, and logs
//! the resulting view.

use anyhow::Context;
use seastate::backend::BackendClient;
use seastate::config::Config;
use seastate::dashboard::{Dashboard, LogNavigator, LogNotifier, RefreshOutcome};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    seastate::logging::init(&config.logging, "");

    tracing::info!("SeaState v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        city = %config.location.city,
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        "Backend: {}",
        config.backend.url
    );

    let client = BackendClient::new(config.client_config()).context("building HTTP client")?;

    let fleet = config.fleet_source()?;

    let dashboard = Dashboard::new(Arc::new(client), config.location.clone())
        .with_fleet(fleet)
        .with_navigator(Arc::new(LogNavigator))
        .with_notifier(Arc::new(LogNotifier));

    let outcome = dashboard.fetch_all_data().await;
    let view = dashboard.view().await;

    for card in &view.cards {
        tracing::info!(status = %card.status, "{}: {}", card.title, card.value);
    }
    if let Some(banner) = &view.alert_banner {
        tracing::info!("{} ({} total)", banner.title, banner.total);
    }
    tracing::info!(
        vessels = view.vessels.len(),
        forecast_accuracy = view.metrics.forecast_accuracy,
        fuel_savings = view.metrics.fuel_savings,
        "Fleet"
    );

    // Like the page, a failed feed leaves the rest of the dashboard usable.
    if let RefreshOutcome::Failed { stage, error, .. } = outcome {
        tracing::warn!(%stage, %error, "Dashboard loaded partially");
    }

    Ok(())
}
