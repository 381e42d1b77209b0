//! Backend Client
//!
//! reqwest client for the weather, marine and alerts endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::wire::{alerts_from_body, marine_from_body, weather_from_body};
use super::{join_url, read_json, BackendError, DataSource};
use crate::dashboard::{Alert, MarineSnapshot, WeatherSnapshot};

/// Weather backend client
pub struct BackendClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds; `None` waits indefinitely
    pub request_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl BackendClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, BackendError> {
        let mut builder =
            Client::builder().user_agent(concat!("seastate/", env!("CARGO_PKG_VERSION")));
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn weather_url(&self, city: &str) -> String {
        join_url(
            &self.config.base_url,
            &format!("/api/weather/city?city={}", urlencoding::encode(city)),
        )
    }

    pub fn marine_url(&self, latitude: f64, longitude: f64) -> String {
        join_url(
            &self.config.base_url,
            &format!("/api/marine?lat={}&lon={}", latitude, longitude),
        )
    }

    pub fn alerts_url(&self) -> String {
        join_url(&self.config.base_url, "/api/alerts")
    }

    async fn get(&self, url: &str) -> Result<Value, BackendError> {
        tracing::debug!(url, "Fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::from_send(url, e))?;

        read_json(url, response).await
    }
}

#[async_trait]
impl DataSource for BackendClient {
    async fn weather(&self, city: &str) -> Result<Option<WeatherSnapshot>, BackendError> {
        let body = self.get(&self.weather_url(city)).await?;
        Ok(weather_from_body(body))
    }

    async fn marine(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<MarineSnapshot>, BackendError> {
        let body = self.get(&self.marine_url(latitude, longitude)).await?;
        Ok(marine_from_body(body))
    }

    async fn alerts(&self) -> Result<Vec<Alert>, BackendError> {
        let body = self.get(&self.alerts_url()).await?;
        Ok(alerts_from_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::stub;
    use crate::dashboard::Severity;
    use axum::{extract::Query, routing::get, Json, Router};
    use std::collections::HashMap;

    fn client(base_url: String) -> BackendClient {
        BackendClient::new(ClientConfig {
            base_url,
            request_timeout_ms: Some(2000),
        })
        .unwrap()
    }

    #[test]
    fn test_urls() {
        let client = client("http://backend.test/".to_string());
        assert_eq!(
            client.weather_url("London"),
            "http://backend.test/api/weather/city?city=London"
        );
        assert_eq!(
            client.weather_url("Rio de Janeiro"),
            "http://backend.test/api/weather/city?city=Rio%20de%20Janeiro"
        );
        assert_eq!(
            client.marine_url(51.5074, -0.1278),
            "http://backend.test/api/marine?lat=51.5074&lon=-0.1278"
        );
        assert_eq!(client.alerts_url(), "http://backend.test/api/alerts");
    }

    #[tokio::test]
    async fn test_fetch_all_feeds() {
        let base = stub::spawn(stub::reference_backend()).await;
        let client = client(base);

        let weather = client.weather("London").await.unwrap();
        assert_eq!(weather, Some(WeatherSnapshot::new(12.0, 30.0, 9000.0)));

        let marine = client.marine(51.5074, -0.1278).await.unwrap().unwrap();
        assert_eq!(marine.wave_height_m, Some(3.1));

        let alerts = client.alerts().await.unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_query_parameters_reach_backend() {
        let router = Router::new()
            .route(
                "/api/weather/city",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let speed = if q.get("city").map(String::as_str) == Some("Cape Town") {
                        20
                    } else {
                        1
                    };
                    Json(serde_json::json!({"wind": {"speed": speed}}))
                }),
            )
            .route(
                "/api/marine",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let lat: f64 = q.get("lat").and_then(|v| v.parse().ok()).unwrap_or(0.0);
                    Json(serde_json::json!({"current": {"wave_height": lat}}))
                }),
            );
        let client = client(stub::spawn(router).await);

        let weather = client.weather("Cape Town").await.unwrap().unwrap();
        assert_eq!(weather.wind_speed_mps, Some(20.0));

        let marine = client.marine(-33.92, 18.42).await.unwrap().unwrap();
        assert_eq!(marine.wave_height_m, Some(-33.92));
    }

    #[tokio::test]
    async fn test_alerts_decoded() {
        let router = Router::new().route(
            "/api/alerts",
            get(|| async {
                Json(serde_json::json!([
                    {"id": 1, "message": "Gale warning", "severity": "High"},
                    {"id": 2, "message": "Fog", "severity": "Low"}
                ]))
            }),
        );
        let client = client(stub::spawn(router).await);

        let alerts = client.alerts().await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, Severity::High);
    }

    #[tokio::test]
    async fn test_null_and_non_array_bodies() {
        let router = Router::new()
            .route("/api/weather/city", get(|| async { Json(serde_json::Value::Null) }))
            .route(
                "/api/alerts",
                get(|| async { Json(serde_json::json!({"error": "none today"})) }),
            );
        let client = client(stub::spawn(router).await);

        assert_eq!(client.weather("London").await.unwrap(), None);
        assert!(client.alerts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let router = Router::new().route("/api/alerts", get(|| async { "<html>oops</html>" }));
        let client = client(stub::spawn(router).await);

        let err = client.alerts().await.unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_decode_error() {
        let client = client(stub::spawn(Router::new()).await);
        let err = client.weather("London").await.unwrap_err();
        match err {
            BackendError::Decode { message, .. } => assert!(message.contains("HTTP 404")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(format!("http://{}", addr));
        let err = client.alerts().await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)));
    }
}
