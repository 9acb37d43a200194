//! Weather backends.
//!
//! A backend answers the three weather capabilities for a free-text location
//! and returns a rendered text blob. Failures stay inside [`BackendError`];
//! the dispatcher turns them into tool output rather than protocol faults.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constants::{REQUEST_TIMEOUT, USER_AGENT};
use crate::units::Units;

pub mod nws;
pub mod openweather;

pub use nws::NwsBackend;
pub use openweather::OpenWeatherBackend;

/// Failure of a single upstream operation
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection failure, timeout, or an interrupted body
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected error: upstream returned {status} for {url}")]
    Status { status: reqwest::StatusCode, url: String },
    #[error("Unexpected error: malformed upstream payload: {0}")]
    Decode(String),
    #[error("No forecast data available for this location")]
    NoData,
    #[error("Unexpected error: {0}")]
    Render(#[from] serde_json::Error),
}

/// The weather capability set shared by every provider strategy
#[async_trait]
pub trait WeatherBackend: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    async fn current_weather(&self, location: &str, units: Units) -> Result<String, BackendError>;

    /// `days` is clamped to [1, 5] before use
    async fn forecast(&self, location: &str, days: i64, units: Units)
        -> Result<String, BackendError>;

    async fn alerts(&self, location: &str) -> Result<String, BackendError>;
}

/// Builds the HTTP client shared by a backend's calls
pub(crate) fn build_client() -> Result<Client, BackendError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Sends a request once and deserializes a successful JSON response
pub(crate) async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, BackendError> {
    let response = request.send().await.map_err(|e| BackendError::Request(e.without_url()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::Status {
            status,
            url: redact_query(response.url()),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| BackendError::Request(e.without_url()))?;
    serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Drops the query string so credentials never reach error text
fn redact_query(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_matches_client_expectations() {
        assert_eq!(
            BackendError::NoData.to_string(),
            "No forecast data available for this location"
        );
        let decode = BackendError::Decode("expected value at line 1 column 1".to_string());
        assert!(decode.to_string().starts_with("Unexpected error:"));
    }

    #[test]
    fn redaction_strips_credentials() {
        let url = reqwest::Url::parse("https://api.example.test/data/2.5/weather?lat=1&appid=secret")
            .expect("url");
        assert_eq!(redact_query(&url), "https://api.example.test/data/2.5/weather");
    }
}
