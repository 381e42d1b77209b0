//! Dashboard View
//!
//! The complete view-model handed to presentation code.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::cards::{derive_weather_cards, WeatherCard};
use super::panels::{alert_banner, fleet_metrics, vessel_tiles, AlertBanner, FleetMetrics, VesselTile};
use super::state::{DashboardState, LoadPhase};
use super::types::{Alert, Vessel};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub phase: LoadPhase,
    /// True until the first refresh settles, and while any refresh runs
    pub loading: bool,
    pub cards: Vec<WeatherCard>,
    pub alert_banner: Option<AlertBanner>,
    pub alerts: Vec<Alert>,
    pub vessels: Vec<VesselTile>,
    pub metrics: FleetMetrics,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl DashboardView {
    pub fn derive(state: &DashboardState, vessels: &[Vessel]) -> Self {
        Self {
            phase: state.phase(),
            loading: state.is_loading(),
            cards: derive_weather_cards(state.weather(), state.marine()),
            alert_banner: alert_banner(state.alerts()),
            alerts: state.alerts().to_vec(),
            vessels: vessel_tiles(vessels),
            metrics: fleet_metrics(state.weather(), vessels.len()),
            last_updated: state.last_updated(),
            last_error: state.last_error().map(str::to_string),
        }
    }
}
