//! # SeaState
//!
//! Maritime weather dashboard aggregator. Fetches current weather, sea state
//! and weather alerts from a backend and turns them into a view-model of
//! condition cards, an alert banner, vessel tiles and fleet metrics.
//!
//! ## Modules
//!
//! - [`dashboard`]: Aggregator, state container and view derivation
//! - [`backend`]: HTTP feeds and the generic JSON helpers
//! - [`api`]: View-model HTTP service with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seastate::backend::{BackendClient, ClientConfig};
//! use seastate::dashboard::{Dashboard, Location};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::new(ClientConfig::default())?;
//!     let dashboard = Dashboard::new(Arc::new(client), Location::default());
//!
//!     // Weather, then marine, then alerts; failures are logged, not returned
//!     let outcome = dashboard.fetch_all_data().await;
//!     println!("Refresh: {:?}", outcome);
//!
//!     for card in dashboard.weather_cards().await {
//!         println!("{}: {} ({})", card.title, card.value, card.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod logging;

// Re-export top-level types for convenience
pub use dashboard::{
    derive_weather_cards, Alert, CardKind, CardStatus, Dashboard, DashboardState, DashboardView,
    LoadPhase, Location, MarineSnapshot, RefreshOutcome, Route, Severity, StatusColor, Vessel,
    WeatherCard, WeatherSnapshot,
};

pub use backend::{BackendClient, BackendError, ClientConfig, DataSource, RestClient};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
