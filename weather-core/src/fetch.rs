use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

/// WeatherAPI.com base URL; overridable for tests and via config.
pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Fixed per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything that can go wrong while fetching current conditions.
///
/// Every variant is terminal; nothing is retried. The `Display` strings are
/// the exact messages surfaced to users and serialized into [`ErrorReply`].
///
/// [`ErrorReply`]: crate::model::ErrorReply
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Weather API key is not configured")]
    MissingApiKey,

    #[error("Please enter a location")]
    EmptyLocation,

    /// HTTP 400; carries the provider's own message when it sent one.
    #[error("{0}")]
    InvalidLocation(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API quota exceeded")]
    QuotaExceeded,

    #[error("Weather service unavailable (Status: {0})")]
    ServiceUnavailable(u16),

    #[error("Request timeout - please try again")]
    Timeout,

    #[error("Connection error - check your internet connection")]
    Connection,

    #[error("Failed to fetch weather data")]
    Transport,

    #[error("An unexpected error occurred")]
    Internal,
}

/// Seam between the front ends and the concrete HTTP client.
///
/// A successful fetch yields the provider body as opaque JSON; interpreting
/// it is the formatter's job.
#[async_trait]
pub trait WeatherSource: Send + Sync + std::fmt::Debug {
    async fn current(
        &self,
        location: &str,
        include_air_quality: bool,
    ) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_options(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            error!(cause = %e, "failed to build HTTP client");
            FetchError::Internal
        })?;

        Ok(Self { api_key: api_key.into(), base_url: base_url.into(), http })
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    async fn current(
        &self,
        location: &str,
        include_air_quality: bool,
    ) -> Result<Value, FetchError> {
        let location = location.trim();
        if self.api_key.trim().is_empty() {
            warn!("rejecting request: no API key configured");
            return Err(FetchError::MissingApiKey);
        }
        if location.is_empty() {
            warn!("rejecting request: empty location");
            return Err(FetchError::EmptyLocation);
        }

        let url = format!("{}/current.json", self.base_url);
        let aqi = if include_air_quality { "yes" } else { "no" };
        debug!(%location, aqi, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", location), ("aqi", aqi)])
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = res.status();
        match status {
            StatusCode::OK => res.json::<Value>().await.map_err(|e| {
                error!(cause = %e, "200 response carried an unreadable body");
                FetchError::Internal
            }),
            StatusCode::BAD_REQUEST => {
                let body = res.text().await.unwrap_or_default();
                let message = provider_error_message(&body)
                    .unwrap_or_else(|| "Invalid location".to_string());
                warn!(%message, "provider rejected the location");
                Err(FetchError::InvalidLocation(message))
            }
            StatusCode::UNAUTHORIZED => {
                error!("provider rejected the API key");
                Err(FetchError::InvalidApiKey)
            }
            StatusCode::FORBIDDEN => {
                error!("provider reports the API quota is exceeded");
                Err(FetchError::QuotaExceeded)
            }
            other => {
                error!(status = other.as_u16(), "unexpected provider status");
                Err(FetchError::ServiceUnavailable(other.as_u16()))
            }
        }
    }
}

fn classify_transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        error!(cause = %e, "request to provider timed out");
        FetchError::Timeout
    } else if e.is_connect() {
        error!(cause = %e, "could not connect to provider");
        FetchError::Connection
    } else {
        error!(cause = %e, "transport failure while fetching weather data");
        FetchError::Transport
    }
}

/// Pull `error.message` out of a provider error body, if it parses at all.
fn provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_the_documented_strings() {
        assert_eq!(FetchError::InvalidApiKey.to_string(), "Invalid API key");
        assert_eq!(FetchError::QuotaExceeded.to_string(), "API quota exceeded");
        assert_eq!(
            FetchError::ServiceUnavailable(503).to_string(),
            "Weather service unavailable (Status: 503)"
        );
        assert_eq!(FetchError::Timeout.to_string(), "Request timeout - please try again");
        assert_eq!(
            FetchError::Connection.to_string(),
            "Connection error - check your internet connection"
        );
        assert_eq!(FetchError::Transport.to_string(), "Failed to fetch weather data");
        assert_eq!(FetchError::Internal.to_string(), "An unexpected error occurred");
    }

    #[test]
    fn provider_error_message_extracts_nested_field() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        assert_eq!(
            provider_error_message(body).as_deref(),
            Some("No matching location found.")
        );
    }

    #[test]
    fn provider_error_message_handles_junk_bodies() {
        assert_eq!(provider_error_message("not json"), None);
        assert_eq!(provider_error_message("{}"), None);
        assert_eq!(provider_error_message(r#"{"error":{}}"#), None);
    }

    #[test]
    fn client_creation_succeeds() {
        assert!(WeatherApiClient::new("KEY").is_ok());
    }
}
