//! Dashboard Aggregator
//!
//! Runs the fetch sequence against a [`DataSource`], keeps the results in a
//! [`DashboardState`] and answers the dashboard's click handlers.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use super::cards::{derive_weather_cards, CardKind, WeatherCard};
use super::fleet::{EmptyFleet, FleetSource};
use super::navigation::{LogNavigator, LogNotifier, Navigator, Notifier, Route};
use super::panels::vessel_details_message;
use super::state::{DashboardState, SlotUpdate};
use super::types::{Alert, Location, Vessel};
use super::view::DashboardView;
use crate::backend::{BackendError, DataSource};

/// Which request of the fetch sequence failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStage {
    Weather,
    Marine,
    Alerts,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStage::Weather => f.write_str("weather"),
            FetchStage::Marine => f.write_str("marine"),
            FetchStage::Alerts => f.write_str("alerts"),
        }
    }
}

/// A failed step of the fetch sequence
#[derive(Debug, Error)]
#[error("{stage} request failed: {source}")]
pub struct FetchError {
    pub stage: FetchStage,
    #[source]
    pub source: BackendError,
}

/// How a call to [`Dashboard::fetch_all_data`] ended
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// All three feeds were fetched
    Completed { generation: u64 },
    /// The sequence stopped at `stage`; earlier slots keep their data
    Failed {
        generation: u64,
        stage: FetchStage,
        error: String,
    },
    /// A newer refresh was issued before this one finished
    Superseded { generation: u64 },
}

impl RefreshOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RefreshOutcome::Completed { .. })
    }
}

/// The maritime dashboard
pub struct Dashboard {
    source: Arc<dyn DataSource>,
    fleet: Arc<dyn FleetSource>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    location: Location,
    state: Arc<RwLock<DashboardState>>,
}

impl Dashboard {
    /// Create a dashboard over `source` for `location`
    ///
    /// The fleet starts empty and navigation/notifications go to the log.
    pub fn new(source: Arc<dyn DataSource>, location: Location) -> Self {
        Self {
            source,
            fleet: Arc::new(EmptyFleet),
            navigator: Arc::new(LogNavigator),
            notifier: Arc::new(LogNotifier),
            location,
            state: Arc::new(RwLock::new(DashboardState::new())),
        }
    }

    pub fn with_fleet(mut self, fleet: Arc<dyn FleetSource>) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// A copy of the current state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Fetch weather, marine and alert data in sequence
    ///
    /// Results are stored as they arrive. The first failure stops the
    /// sequence; it is logged and reported in the outcome, never returned
    /// as an error. The loading phase is always left afterwards.
    pub async fn fetch_all_data(&self) -> RefreshOutcome {
        let generation = self.state.write().await.begin_refresh();
        tracing::debug!(generation, city = %self.location.city, "Refreshing dashboard data");

        let result = self.run_fetch_sequence(generation).await;

        let settled = {
            let mut state = self.state.write().await;
            state.finish(generation, result.as_ref().err().map(|e| e.to_string()))
        };

        match result {
            Err(e) => {
                tracing::error!(generation, stage = %e.stage, error = %e.source, "Error fetching data");
                if settled {
                    RefreshOutcome::Failed {
                        generation,
                        stage: e.stage,
                        error: e.source.to_string(),
                    }
                } else {
                    RefreshOutcome::Superseded { generation }
                }
            }
            Ok(()) if settled => {
                tracing::info!(generation, "Dashboard data refreshed");
                RefreshOutcome::Completed { generation }
            }
            Ok(()) => {
                tracing::debug!(generation, "Refresh superseded by a newer one");
                RefreshOutcome::Superseded { generation }
            }
        }
    }

    async fn run_fetch_sequence(&self, generation: u64) -> Result<(), FetchError> {
        let weather = self
            .source
            .weather(&self.location.city)
            .await
            .map_err(|source| FetchError {
                stage: FetchStage::Weather,
                source,
            })?;
        self.store(generation, SlotUpdate::Weather(weather)).await;

        let marine = self
            .source
            .marine(self.location.latitude, self.location.longitude)
            .await
            .map_err(|source| FetchError {
                stage: FetchStage::Marine,
                source,
            })?;
        self.store(generation, SlotUpdate::Marine(marine)).await;

        let alerts = self.source.alerts().await.map_err(|source| FetchError {
            stage: FetchStage::Alerts,
            source,
        })?;
        tracing::debug!(generation, count = alerts.len(), "Fetched alerts");
        self.store(generation, SlotUpdate::Alerts(alerts)).await;

        Ok(())
    }

    async fn store(&self, generation: u64, update: SlotUpdate) {
        self.state.write().await.apply(generation, update);
    }

    /// Condition cards for the current snapshots
    pub async fn weather_cards(&self) -> Vec<WeatherCard> {
        let state = self.state.read().await;
        derive_weather_cards(state.weather(), state.marine())
    }

    pub async fn alerts(&self) -> Vec<Alert> {
        self.state.read().await.alerts().to_vec()
    }

    pub fn vessels(&self) -> Vec<Vessel> {
        self.fleet.vessels()
    }

    /// Everything the presentation layer needs, derived from current state
    pub async fn view(&self) -> DashboardView {
        let state = self.state().await;
        DashboardView::derive(&state, &self.fleet.vessels())
    }

    // ============================================
    // Click handlers
    // ============================================

    /// Re-run the fetch sequence
    pub async fn handle_refresh_data(&self) -> RefreshOutcome {
        self.fetch_all_data().await
    }

    /// Show the details of a vessel, if it is in the fleet
    pub fn handle_view_details(&self, vessel_id: &str) -> Option<String> {
        let vessel = self
            .fleet
            .vessels()
            .into_iter()
            .find(|v| v.id.matches(vessel_id))?;

        let message = vessel_details_message(&vessel);
        self.notifier.notify(&message);
        Some(message)
    }

    pub fn handle_optimize_route(&self, vessel_id: &str) -> Route {
        tracing::debug!(vessel_id, "Optimize route requested");
        self.navigate(Route::Recommendations)
    }

    pub fn handle_view_alerts(&self) -> Route {
        self.navigate(Route::Alerts)
    }

    pub fn handle_view_map(&self) -> Route {
        self.navigate(Route::Map)
    }

    /// Navigate to the page behind a condition card
    pub fn activate_card(&self, kind: CardKind) -> Route {
        self.navigate(kind.target())
    }

    /// Follow any dashboard link through the configured navigator
    pub fn navigate(&self, route: Route) -> Route {
        self.navigator.navigate(route);
        route
    }
}
