//! Weather provider configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{aws::empty_secret, default_true};

/// WeatherAPI.com configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API key (sensitive - uses `SecretString`)
    #[serde(skip_serializing, default = "empty_secret")]
    pub api_key: SecretString,

    /// API base URL (default: <http://api.weatherapi.com/v1>)
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Request air quality data (default: true)
    #[serde(default = "default_true")]
    pub air_quality: bool,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("air_quality", &self.air_quality)
            .finish()
    }
}

fn default_weather_base_url() -> String {
    "http://api.weatherapi.com/v1".to_string()
}

const fn default_weather_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: empty_secret(),
            base_url: default_weather_base_url(),
            timeout_secs: default_weather_timeout(),
            air_quality: true,
        }
    }
}

impl WeatherConfig {
    /// Convert to `integration_weather`'s `WeatherApiConfig`
    #[must_use]
    pub fn to_weather_api_config(&self) -> integration_weather::WeatherApiConfig {
        integration_weather::WeatherApiConfig {
            api_key: self.api_key.expose_secret().to_string(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            air_quality: self.air_quality,
        }
    }

    /// Get the API key as a string reference
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        self.api_key.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "http://api.weatherapi.com/v1");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.air_quality);
        assert!(config.api_key_str().is_empty());
    }

    #[test]
    fn converts_to_client_config() {
        let config = WeatherConfig {
            api_key: SecretString::from("key-123"),
            timeout_secs: 5,
            air_quality: false,
            ..Default::default()
        };

        let client = config.to_weather_api_config();
        assert_eq!(client.api_key, "key-123");
        assert_eq!(client.timeout_secs, 5);
        assert!(!client.air_quality);
        assert_eq!(client.base_url, "http://api.weatherapi.com/v1");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = WeatherConfig {
            api_key: SecretString::from("key-123"),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("key-123"));
    }
}
