//! Wire Types
//!
//! Raw response bodies of the weather backend. Decoding never fails once
//! the body is valid JSON:
//!
//! - numeric fields accept numbers and numeric strings, anything else is
//!   absent
//! - a nested block of the wrong type is absent
//! - a falsy body (`null`, `false`, `0`, `""`) means "no reading"
//! - an alerts body that is not an array means "no alerts"

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::dashboard::{Alert, MarineSnapshot, WeatherSnapshot};

/// `GET /api/weather/city`
#[derive(Debug, Default, Deserialize)]
pub struct WeatherResponse {
    #[serde(default, deserialize_with = "lenient_block")]
    pub wind: Option<WindBlock>,
    #[serde(default, deserialize_with = "lenient_block")]
    pub main: Option<MainBlock>,
    /// Meters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub visibility: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WindBlock {
    /// Meters per second
    #[serde(default, deserialize_with = "lenient_f64")]
    pub speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MainBlock {
    /// Degrees Celsius
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temp: Option<f64>,
}

/// `GET /api/marine`
#[derive(Debug, Default, Deserialize)]
pub struct MarineResponse {
    #[serde(default, deserialize_with = "lenient_block")]
    pub current: Option<MarineCurrent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarineCurrent {
    /// Meters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wave_height: Option<f64>,
}

impl From<WeatherResponse> for WeatherSnapshot {
    fn from(raw: WeatherResponse) -> Self {
        Self {
            wind_speed_mps: raw.wind.and_then(|w| w.speed),
            temperature_c: raw.main.and_then(|m| m.temp),
            visibility_m: raw.visibility,
        }
    }
}

impl From<MarineResponse> for MarineSnapshot {
    fn from(raw: MarineResponse) -> Self {
        Self {
            wave_height_m: raw.current.and_then(|c| c.wave_height),
        }
    }
}

/// Decode a weather body; `None` when the body is falsy
pub fn weather_from_body(body: Value) -> Option<WeatherSnapshot> {
    if is_falsy(&body) {
        return None;
    }
    let raw: WeatherResponse = serde_json::from_value(body).unwrap_or_default();
    Some(raw.into())
}

/// Decode a marine body; `None` when the body is falsy
pub fn marine_from_body(body: Value) -> Option<MarineSnapshot> {
    if is_falsy(&body) {
        return None;
    }
    let raw: MarineResponse = serde_json::from_value(body).unwrap_or_default();
    Some(raw.into())
}

/// Decode an alerts body, skipping entries that are not alert objects
pub fn alerts_from_body(body: Value) -> Vec<Alert> {
    let Value::Array(items) = body else {
        tracing::debug!("Alerts body is not an array, treating as no alerts");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(alert) => Some(alert),
            Err(e) => {
                tracing::debug!("Skipping malformed alert: {}", e);
                None
            }
        })
        .collect()
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn lenient_block<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_response_to_snapshot() {
        let raw: WeatherResponse = serde_json::from_str(
            r#"{"name": "London", "wind": {"speed": 12, "deg": 240},
                "main": {"temp": 30, "humidity": 71}, "visibility": 9000}"#,
        )
        .unwrap();

        let snapshot = WeatherSnapshot::from(raw);
        assert_eq!(snapshot, WeatherSnapshot::new(12.0, 30.0, 9000.0));
    }

    #[test]
    fn test_weather_missing_fields() {
        let raw: WeatherResponse = serde_json::from_str(r#"{"main": {}}"#).unwrap();
        let snapshot = WeatherSnapshot::from(raw);
        assert_eq!(snapshot, WeatherSnapshot::default());
    }

    #[test]
    fn test_weather_lenient_numbers() {
        let raw: WeatherResponse = serde_json::from_str(
            r#"{"wind": {"speed": "7.5"}, "main": {"temp": null}, "visibility": "far"}"#,
        )
        .unwrap();

        let snapshot = WeatherSnapshot::from(raw);
        assert_eq!(snapshot.wind_speed_mps, Some(7.5));
        assert_eq!(snapshot.temperature_c, None);
        assert_eq!(snapshot.visibility_m, None);
    }

    #[test]
    fn test_marine_response() {
        let raw: MarineResponse =
            serde_json::from_str(r#"{"current": {"wave_height": 3.1}}"#).unwrap();
        assert_eq!(MarineSnapshot::from(raw).wave_height_m, Some(3.1));

        let raw: MarineResponse = serde_json::from_str(r#"{"hourly": {}}"#).unwrap();
        assert_eq!(MarineSnapshot::from(raw).wave_height_m, None);
    }

    #[test]
    fn test_falsy_weather_body_is_no_reading() {
        assert_eq!(weather_from_body(Value::Null), None);
        assert_eq!(weather_from_body(serde_json::json!(0)), None);
        assert_eq!(weather_from_body(serde_json::json!("")), None);
    }

    #[test]
    fn test_odd_weather_bodies() {
        let snapshot = weather_from_body(serde_json::json!([1, 2])).unwrap();
        assert_eq!(snapshot, WeatherSnapshot::default());

        let snapshot =
            weather_from_body(serde_json::json!({"wind": "calm", "main": {"temp": 11}})).unwrap();
        assert_eq!(snapshot.wind_speed_mps, None);
        assert_eq!(snapshot.temperature_c, Some(11.0));
    }

    #[test]
    fn test_marine_body() {
        assert_eq!(marine_from_body(Value::Null), None);
        let snapshot = marine_from_body(serde_json::json!({"current": 4})).unwrap();
        assert_eq!(snapshot.wave_height_m, None);
    }

    #[test]
    fn test_alerts_body() {
        assert!(alerts_from_body(Value::Null).is_empty());
        assert!(alerts_from_body(serde_json::json!({"alerts": []})).is_empty());

        let alerts = alerts_from_body(serde_json::json!([
            {"id": 1, "message": "Gale", "severity": null},
            "not an alert"
        ]));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message, "Gale");
    }
}
