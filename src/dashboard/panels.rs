//! Dashboard Panels
//!
//! Derived views below the condition cards: the alert banner, the vessel
//! tiles of the fleet monitor and the performance metrics strip.

use serde::Serialize;

use super::cards::{display_number, StatusColor};
use super::navigation::Route;
use super::types::{Alert, RecordId, Severity, Vessel, VesselStatus, WeatherSnapshot};

/// The banner shows at most this many alerts
pub const BANNER_ALERT_LIMIT: usize = 2;

/// Scale factor from tracked vessels to the "vessels monitored" figure
pub const VESSELS_MONITORED_FACTOR: usize = 126;

// ============================================
// Alert banner
// ============================================

/// One alert line inside the banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerAlert {
    pub id: RecordId,
    pub message: String,
    pub severity: Severity,
    pub badge: StatusColor,
}

/// Banner listing the most recent alerts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertBanner {
    pub title: &'static str,
    pub alerts: Vec<BannerAlert>,
    /// Number of alerts in the feed, including ones not shown
    pub total: usize,
    /// "View All Alerts" destination
    pub action: Route,
}

/// Badge color for an alert severity
pub fn severity_badge(severity: &Severity) -> StatusColor {
    match severity {
        Severity::High => StatusColor::Destructive,
        Severity::Medium => StatusColor::Warning,
        Severity::Low | Severity::Other(_) => StatusColor::Info,
    }
}

/// Build the alert banner, or `None` when there is nothing to show
pub fn alert_banner(alerts: &[Alert]) -> Option<AlertBanner> {
    if alerts.is_empty() {
        return None;
    }

    let shown = alerts
        .iter()
        .take(BANNER_ALERT_LIMIT)
        .map(|alert| BannerAlert {
            id: alert.id.clone(),
            message: alert.message.clone(),
            severity: alert.severity.clone(),
            badge: severity_badge(&alert.severity),
        })
        .collect();

    Some(AlertBanner {
        title: "Active Weather Alerts",
        alerts: shown,
        total: alerts.len(),
        action: Route::Alerts,
    })
}

// ============================================
// Fleet monitor
// ============================================

/// A vessel as shown in the fleet monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselTile {
    pub id: RecordId,
    pub name: String,
    pub vessel_type: String,
    pub status: VesselStatus,
    pub badge: StatusColor,
    pub speed: String,
    pub wind: String,
}

pub fn vessel_badge(status: &VesselStatus) -> StatusColor {
    match status {
        VesselStatus::Optimal => StatusColor::Success,
        VesselStatus::Caution => StatusColor::Warning,
        VesselStatus::Other(_) => StatusColor::Destructive,
    }
}

pub fn vessel_tiles(vessels: &[Vessel]) -> Vec<VesselTile> {
    vessels
        .iter()
        .map(|v| VesselTile {
            id: v.id.clone(),
            name: v.name.clone(),
            vessel_type: v.vessel_type.clone(),
            status: v.status.clone(),
            badge: vessel_badge(&v.status),
            speed: v.speed.clone(),
            wind: format!("{} knots", display_number(v.weather.wind)),
        })
        .collect()
}

/// Text of the vessel details notification
pub fn vessel_details_message(vessel: &Vessel) -> String {
    format!(
        "Vessel Details:\nName: {}\nType: {}\nStatus: {}\nSpeed: {}\nWind: {} knots\nTemp: {}°C",
        vessel.name,
        vessel.vessel_type,
        vessel.status,
        vessel.speed,
        display_number(vessel.weather.wind),
        display_number(vessel.weather.temp),
    )
}

// ============================================
// Performance metrics
// ============================================

/// Headline figures in the performance strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetMetrics {
    pub forecast_accuracy: &'static str,
    pub vessels_monitored: usize,
    pub fuel_savings: &'static str,
}

pub fn fleet_metrics(weather: Option<&WeatherSnapshot>, vessel_count: usize) -> FleetMetrics {
    let high_wind = weather
        .and_then(|w| w.wind_speed_mps)
        .map(|speed| speed > 10.0)
        .unwrap_or(false);

    FleetMetrics {
        forecast_accuracy: if weather.is_some() { "94%" } else { "92%" },
        vessels_monitored: vessel_count * VESSELS_MONITORED_FACTOR,
        fuel_savings: if high_wind { "8%" } else { "15%" },
    }
}
