//! Backend Feeds
//!
//! HTTP access to the weather backend.
//!
//! - **DataSource**: the three feeds the dashboard aggregates
//! - **BackendClient**: reqwest implementation of [`DataSource`]
//! - **RestClient**: generic JSON GET/POST helper against the API base URL
//! - **wire**: raw response shapes and lenient decoding

mod client;
mod rest;
#[cfg(test)]
pub(crate) mod stub;
pub mod wire;

pub use client::{BackendClient, ClientConfig};
pub use rest::RestClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::dashboard::{Alert, MarineSnapshot, WeatherSnapshot};

/// The feeds behind the dashboard
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Current weather for a city; `None` when the backend sent no reading
    async fn weather(&self, city: &str) -> Result<Option<WeatherSnapshot>, BackendError>;

    /// Current sea state at a position; `None` when the backend sent no reading
    async fn marine(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<MarineSnapshot>, BackendError>;

    /// Active weather alerts
    async fn alerts(&self) -> Result<Vec<Alert>, BackendError>;
}

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend unavailable at {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid JSON from {url}: {message}")]
    Decode { url: String, message: String },
}

impl BackendError {
    fn from_send(url: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::Unavailable(url.to_string())
        } else {
            BackendError::Request(e)
        }
    }
}

/// Decode a response body as JSON, whatever the HTTP status
///
/// The backend reports some failures as JSON bodies on non-2xx statuses,
/// so the status only shows up in the decode error message.
pub(crate) async fn read_json<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| BackendError::Decode {
        url: url.to_string(),
        message: format!("{} (HTTP {})", e, status.as_u16()),
    })
}

/// Join a path onto a base URL with exactly one slash between them
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://example.com/", "/api/alerts"),
            "https://example.com/api/alerts"
        );
        assert_eq!(
            join_url("http://localhost:8000", "api/alerts"),
            "http://localhost:8000/api/alerts"
        );
    }
}
