//! Data Transfer Objects
//!
//! Response types of the view-model service that are not view-model types
//! themselves.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dashboard::{DashboardView, LoadPhase, RefreshOutcome, Route, VesselTile};

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" once data has loaded, "degraded" when the last refresh
    /// failed, "starting" before anything has loaded
    pub status: String,
    pub phase: LoadPhase,
    pub last_updated: Option<DateTime<Utc>>,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Result of a manual refresh
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub outcome: RefreshOutcome,
    pub view: DashboardView,
}

/// Vessel tile plus the details text
#[derive(Debug, Serialize)]
pub struct VesselDetailsResponse {
    pub vessel: VesselTile,
    pub details: String,
}

/// Where the front end should navigate to
#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub route: String,
}

impl From<Route> for NavigateResponse {
    fn from(route: Route) -> Self {
        Self {
            route: route.path().to_string(),
        }
    }
}
