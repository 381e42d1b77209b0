//! Dashboard Data Types
//!
//! Snapshots of the backend feeds plus the alert and vessel records the
//! dashboard renders. Snapshots are decoupled from the wire shape; see
//! [`crate::backend::wire`] for the raw responses.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// Snapshots
// ============================================

/// Most recent weather reading for the configured city
///
/// Fields are optional because the backend is not guaranteed to send them.
/// Absent values are carried through derivation as NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Wind speed in meters per second
    pub wind_speed_mps: Option<f64>,
    /// Air temperature in degrees Celsius
    pub temperature_c: Option<f64>,
    /// Visibility in meters
    pub visibility_m: Option<f64>,
}

impl WeatherSnapshot {
    /// Create a snapshot with every field present
    pub fn new(wind_speed_mps: f64, temperature_c: f64, visibility_m: f64) -> Self {
        Self {
            wind_speed_mps: Some(wind_speed_mps),
            temperature_c: Some(temperature_c),
            visibility_m: Some(visibility_m),
        }
    }
}

/// Most recent sea-state reading for the configured coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarineSnapshot {
    /// Significant wave height in meters
    pub wave_height_m: Option<f64>,
}

impl MarineSnapshot {
    pub fn new(wave_height_m: f64) -> Self {
        Self {
            wave_height_m: Some(wave_height_m),
        }
    }
}

/// Where the dashboard pulls its conditions for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

fn default_city() -> String {
    "London".to_string()
}

fn default_latitude() -> f64 {
    51.5074
}

fn default_longitude() -> f64 {
    -0.1278
}

impl Default for Location {
    fn default() -> Self {
        Self {
            city: default_city(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

// ============================================
// Records
// ============================================

/// Identifier of an alert or vessel; the backend sends numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Compare against an id typed by a user or taken from a URL
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            RecordId::Number(n) => raw.trim().parse::<i64>().map(|r| r == *n).unwrap_or(false),
            RecordId::Text(s) => s == raw,
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Alert severity as reported by the backend
///
/// Unrecognized labels are kept verbatim so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Other(String),
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Low" => Severity::Low,
            "Medium" => Severity::Medium,
            "High" => Severity::High,
            _ => Severity::Other(raw),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => f.write_str("Low"),
            Severity::Medium => f.write_str("Medium"),
            Severity::High => f.write_str("High"),
            Severity::Other(s) => f.write_str(s),
        }
    }
}

/// A weather alert from the alerts feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: Severity,
}

impl Alert {
    pub fn new(id: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: RecordId::Text(id.into()),
            message: message.into(),
            severity,
        }
    }
}

/// Operational status of a vessel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VesselStatus {
    Optimal,
    Caution,
    Other(String),
}

impl From<String> for VesselStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Optimal" => VesselStatus::Optimal,
            "Caution" => VesselStatus::Caution,
            _ => VesselStatus::Other(raw),
        }
    }
}

impl From<VesselStatus> for String {
    fn from(status: VesselStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for VesselStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VesselStatus::Optimal => f.write_str("Optimal"),
            VesselStatus::Caution => f.write_str("Caution"),
            VesselStatus::Other(s) => f.write_str(s),
        }
    }
}

/// Conditions reported on board a vessel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselWeather {
    /// Wind in knots
    pub wind: f64,
    /// Temperature in degrees Celsius
    pub temp: f64,
}

/// A monitored vessel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub vessel_type: String,
    pub status: VesselStatus,
    /// Display speed, e.g. "14.2 knots"
    #[serde(deserialize_with = "string_or_number")]
    pub speed: String,
    pub weather: VesselWeather,
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
