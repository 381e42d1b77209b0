//! Maritime Dashboard
//!
//! Aggregates the backend feeds into the dashboard view-model.
//!
//! ## Architecture
//!
//! - **Dashboard**: runs the fetch sequence and the click handlers
//! - **DashboardState**: snapshots plus the loading lifecycle
//! - **cards / panels**: pure derivation of what the page shows
//! - **FleetSource / Navigator / Notifier**: injected collaborators
//!
//! ## Data Flow
//!
//! 1. `fetch_all_data` requests weather, then marine, then alerts
//! 2. Each result replaces its snapshot as soon as it arrives
//! 3. `view` derives cards, banner, vessel tiles and metrics on demand

mod aggregator;
pub mod cards;
mod fleet;
mod navigation;
pub mod panels;
mod state;
mod types;
mod view;

pub use aggregator::{Dashboard, FetchError, FetchStage, RefreshOutcome};
pub use cards::{derive_weather_cards, CardKind, CardStatus, StatusColor, WeatherCard};
pub use fleet::{EmptyFleet, FleetError, FleetSource, StaticFleet};
pub use navigation::{LogNavigator, LogNotifier, Navigator, Notifier, Route};
pub use panels::{AlertBanner, BannerAlert, FleetMetrics, VesselTile};
pub use state::{DashboardState, LoadPhase, SlotUpdate};
pub use types::{
    Alert, Location, MarineSnapshot, RecordId, Severity, Vessel, VesselStatus, VesselWeather,
    WeatherSnapshot,
};
pub use view::DashboardView;
