//! Weather Cards
//!
//! Derives the four condition cards shown at the top of the dashboard from
//! the current weather and marine snapshots. Derivation is a pure function
//! of its inputs; cards have no identity of their own.
//!
//! Missing readings are deliberately not guarded. They flow through the
//! arithmetic as NaN, render as `"NaN"` and fail every threshold
//! comparison, so a card still appears with its lowest status.

use serde::Serialize;
use std::fmt;

use super::navigation::Route;
use super::types::{MarineSnapshot, WeatherSnapshot};

/// Meters per second to knots
pub const MPS_TO_KNOTS: f64 = 1.94384;

/// Shown when the marine feed has no wave height
pub const FALLBACK_WAVE_HEIGHT: &str = "2.3m";

const WIND_HIGH_MPS: f64 = 10.0;
const WIND_MODERATE_MPS: f64 = 5.0;
const TEMP_WARM_C: f64 = 25.0;
const TEMP_COLD_C: f64 = 10.0;
const VISIBILITY_EXCELLENT_M: f64 = 8000.0;
const VISIBILITY_GOOD_M: f64 = 5000.0;

/// Which condition a card shows; doubles as the icon key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    WindSpeed,
    WaveHeight,
    Temperature,
    Visibility,
}

impl CardKind {
    pub fn title(&self) -> &'static str {
        match self {
            CardKind::WindSpeed => "Wind Speed",
            CardKind::WaveHeight => "Wave Height",
            CardKind::Temperature => "Temperature",
            CardKind::Visibility => "Visibility",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CardKind::WindSpeed => "wind",
            CardKind::WaveHeight => "waves",
            CardKind::Temperature => "thermometer",
            CardKind::Visibility => "eye",
        }
    }

    /// Where clicking the card navigates to
    pub fn target(&self) -> Route {
        match self {
            CardKind::WindSpeed | CardKind::Temperature => Route::Forecast,
            CardKind::WaveHeight => Route::Map,
            CardKind::Visibility => Route::Alerts,
        }
    }
}

impl std::str::FromStr for CardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wind" | "wind_speed" | "wind-speed" => Ok(CardKind::WindSpeed),
            "waves" | "wave" | "wave_height" | "wave-height" => Ok(CardKind::WaveHeight),
            "temperature" | "temp" => Ok(CardKind::Temperature),
            "visibility" => Ok(CardKind::Visibility),
            other => Err(format!("Unknown card: {}", other)),
        }
    }
}

/// Qualitative label attached to a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardStatus {
    High,
    Moderate,
    Low,
    Warm,
    Cold,
    Optimal,
    Excellent,
    Good,
    Poor,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CardStatus::High => "High",
            CardStatus::Moderate => "Moderate",
            CardStatus::Low => "Low",
            CardStatus::Warm => "Warm",
            CardStatus::Cold => "Cold",
            CardStatus::Optimal => "Optimal",
            CardStatus::Excellent => "Excellent",
            CardStatus::Good => "Good",
            CardStatus::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// Semantic color class for statuses and badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Success,
    Warning,
    Destructive,
    Info,
}

impl StatusColor {
    /// Front-end text class
    pub fn class(&self) -> &'static str {
        match self {
            StatusColor::Success => "text-success",
            StatusColor::Warning => "text-warning",
            StatusColor::Destructive => "text-destructive",
            StatusColor::Info => "text-info",
        }
    }
}

/// A derived condition card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCard {
    pub kind: CardKind,
    pub icon: &'static str,
    pub title: &'static str,
    pub value: String,
    pub status: CardStatus,
    pub color: StatusColor,
    pub target: Route,
}

impl WeatherCard {
    fn new(kind: CardKind, value: String, status: CardStatus, color: StatusColor) -> Self {
        Self {
            kind,
            icon: kind.icon(),
            title: kind.title(),
            value,
            status,
            color,
            target: kind.target(),
        }
    }
}

/// Derive the condition cards from the current snapshots
///
/// Returns nothing until a weather snapshot exists. The marine snapshot is
/// optional; without it the wave card shows [`FALLBACK_WAVE_HEIGHT`].
pub fn derive_weather_cards(
    weather: Option<&WeatherSnapshot>,
    marine: Option<&MarineSnapshot>,
) -> Vec<WeatherCard> {
    let Some(weather) = weather else {
        return Vec::new();
    };

    let wind = weather.wind_speed_mps.unwrap_or(f64::NAN);
    let temp = weather.temperature_c.unwrap_or(f64::NAN);
    let visibility = weather.visibility_m.unwrap_or(f64::NAN);

    vec![
        wind_card(wind),
        wave_card(marine.and_then(|m| m.wave_height_m)),
        temperature_card(temp),
        visibility_card(visibility),
    ]
}

fn wind_card(speed_mps: f64) -> WeatherCard {
    let knots = round_half_up(speed_mps * MPS_TO_KNOTS);
    let (status, color) = wind_status(speed_mps);
    WeatherCard::new(
        CardKind::WindSpeed,
        format!("{} knots", display_number(knots)),
        status,
        color,
    )
}

fn wave_card(height_m: Option<f64>) -> WeatherCard {
    // Zero counts as "no reading", like an unset gauge.
    let value = match height_m {
        Some(h) if h != 0.0 && !h.is_nan() => format!("{}m", display_number(h)),
        _ => FALLBACK_WAVE_HEIGHT.to_string(),
    };
    WeatherCard::new(
        CardKind::WaveHeight,
        value,
        CardStatus::Moderate,
        StatusColor::Warning,
    )
}

fn temperature_card(temp_c: f64) -> WeatherCard {
    WeatherCard::new(
        CardKind::Temperature,
        format!("{}°C", display_number(round_half_up(temp_c))),
        temperature_status(temp_c),
        StatusColor::Success,
    )
}

fn visibility_card(visibility_m: f64) -> WeatherCard {
    let color = if visibility_m > VISIBILITY_GOOD_M {
        StatusColor::Success
    } else {
        StatusColor::Warning
    };
    WeatherCard::new(
        CardKind::Visibility,
        format!("{} km", format_one_decimal(visibility_m / 1000.0)),
        visibility_status(visibility_m),
        color,
    )
}

/// Wind status and color for a speed in m/s
pub fn wind_status(speed_mps: f64) -> (CardStatus, StatusColor) {
    if speed_mps > WIND_HIGH_MPS {
        (CardStatus::High, StatusColor::Destructive)
    } else if speed_mps > WIND_MODERATE_MPS {
        (CardStatus::Moderate, StatusColor::Warning)
    } else {
        (CardStatus::Low, StatusColor::Success)
    }
}

pub fn temperature_status(temp_c: f64) -> CardStatus {
    if temp_c > TEMP_WARM_C {
        CardStatus::Warm
    } else if temp_c < TEMP_COLD_C {
        CardStatus::Cold
    } else {
        CardStatus::Optimal
    }
}

pub fn visibility_status(visibility_m: f64) -> CardStatus {
    if visibility_m > VISIBILITY_EXCELLENT_M {
        CardStatus::Excellent
    } else if visibility_m > VISIBILITY_GOOD_M {
        CardStatus::Good
    } else {
        CardStatus::Poor
    }
}

/// Round to the nearest integer, ties toward positive infinity
///
/// Never returns negative zero.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor() + 0.0
}

/// Render with exactly one decimal the way the front end's `toFixed(1)` does
///
/// Rounds the exact binary value, so `1.15` (stored just below the tie)
/// gives `"1.1"`. Exact ties can only be quarters (`1.25`, `0.75`) and
/// round toward positive infinity.
fn format_one_decimal(value: f64) -> String {
    if !value.is_finite() {
        return display_number(value);
    }

    let quarters = value * 4.0;
    let value = if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        value + 0.05
    } else {
        value
    };
    format!("{:.1}", value + 0.0)
}

/// Shortest display form of a number: `23`, `3.1`, `NaN`
pub(crate) fn display_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{}", value + 0.0)
    }
}
