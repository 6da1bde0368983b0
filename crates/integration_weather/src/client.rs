//! WeatherAPI.com client
//!
//! HTTP client for the `current.json` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

const USER_AGENT: &str = concat!("weather-cache/", env!("CARGO_PKG_VERSION"));

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was not a JSON object
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Upstream {
        /// Status code returned by the provider
        status: u16,
        /// `error.message` from the body, or the raw body text
        message: String,
    },
}

/// WeatherAPI.com client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,

    /// API base URL (default: <http://api.weatherapi.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Include air quality data in the response (default: true)
    #[serde(default = "default_air_quality")]
    pub air_quality: bool,
}

fn default_base_url() -> String {
    "http://api.weatherapi.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_air_quality() -> bool {
    true
}

impl std::fmt::Debug for WeatherApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("air_quality", &self.air_quality)
            .finish()
    }
}

impl WeatherApiConfig {
    /// Configuration with defaults for everything but the key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            air_quality: default_air_quality(),
        }
    }
}

/// Weather client trait for fetching current conditions
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a city as the provider's JSON object
    async fn current(&self, city: &str) -> Result<Map<String, Value>, WeatherError>;
}

/// Shape of the provider's error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// WeatherAPI.com HTTP client implementation
#[derive(Debug)]
pub struct WeatherApiClient {
    client: Client,
    config: WeatherApiConfig,
}

impl WeatherApiClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherApiConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.config.base_url.trim_end_matches('/'))
    }

    const fn aqi(&self) -> &'static str {
        if self.config.air_quality { "yes" } else { "no" }
    }

    /// Message the provider attached to a failed response
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .map_or_else(|_| body.trim().to_string(), |b| b.error.message)
    }
}

#[async_trait]
impl WeatherClient for WeatherApiClient {
    #[instrument(skip(self))]
    async fn current(&self, city: &str) -> Result<Map<String, Value>, WeatherError> {
        debug!(url = %self.current_url(), "Fetching current weather");

        let response = self
            .client
            .get(self.current_url())
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", city),
                ("aqi", self.aqi()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        if status != reqwest::StatusCode::OK {
            let message = Self::error_message(&body);
            warn!(status = status.as_u16(), message = %message, "Weather provider rejected request");
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(WeatherError::ParseError(format!(
                "expected a JSON object, got {}",
                kind(&other)
            ))),
            Err(e) => Err(WeatherError::ParseError(e.to_string())),
        }
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WeatherApiConfig::with_api_key("k");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, "http://api.weatherapi.com/v1");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.air_quality);
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: WeatherApiConfig =
            serde_json::from_str(r#"{"api_key": "secret", "air_quality": false}"#).unwrap();
        assert_eq!(config.base_url, "http://api.weatherapi.com/v1");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.air_quality);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = WeatherApiConfig::with_api_key("super-secret-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("[REDACTED]"));

        let client = WeatherApiClient::new(config).unwrap();
        assert!(!format!("{client:?}").contains("super-secret-key"));
    }

    #[test]
    fn test_current_url_trims_trailing_slash() {
        let mut config = WeatherApiConfig::with_api_key("k");
        config.base_url = "http://localhost:9000/v1/".to_string();
        let client = WeatherApiClient::new(config).unwrap();
        assert_eq!(client.current_url(), "http://localhost:9000/v1/current.json");
    }

    #[test]
    fn test_aqi_flag() {
        let mut config = WeatherApiConfig::with_api_key("k");
        assert_eq!(WeatherApiClient::new(config.clone()).unwrap().aqi(), "yes");
        config.air_quality = false;
        assert_eq!(WeatherApiClient::new(config).unwrap().aqi(), "no");
    }

    #[test]
    fn test_error_message_from_provider_body() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        assert_eq!(
            WeatherApiClient::error_message(body),
            "No matching location found."
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(
            WeatherApiClient::error_message("Bad Gateway\n"),
            "Bad Gateway"
        );
        assert_eq!(WeatherApiClient::error_message(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn test_upstream_error_display() {
        let err = WeatherError::Upstream {
            status: 401,
            message: "API key is invalid.".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401: API key is invalid.");
    }
}
