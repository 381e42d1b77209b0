//! Generic JSON helpers
//!
//! GET/POST against the API base URL, for backend endpoints outside the
//! dashboard feeds.

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use super::{join_url, read_json, BackendError};

/// JSON GET/POST client bound to one base URL
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder()
                .user_agent(concat!("seastate/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and parse the JSON response
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BackendError::from_send(&url, e))?;

        read_json(&url, response).await
    }

    /// POST `body` as JSON to `path` and parse the JSON response
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::from_send(&url, e))?;

        read_json(&url, response).await
    }
}
