//! Weather adapter - Implements WeatherPort using integration_weather

use application::{error::ApplicationError, ports::WeatherPort};
use async_trait::async_trait;
use domain::{City, WeatherRecord};
use integration_weather::{WeatherApiClient, WeatherApiConfig, WeatherClient, WeatherError};
use tracing::{debug, instrument};

/// Adapter for the WeatherAPI.com client
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"WeatherApiClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherApiConfig) -> Result<Self, ApplicationError> {
        let client =
            WeatherApiClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Wrap any weather client
    pub fn with_client(client: impl WeatherClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::Upstream { status, message } => {
                ApplicationError::Upstream { status, message }
            },
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ParseError(e) => ApplicationError::ExternalService(e),
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn fetch_current(&self, city: &City) -> Result<WeatherRecord, ApplicationError> {
        let body = self
            .client
            .current(city.as_str())
            .await
            .map_err(Self::map_error)?;

        debug!(fields = body.len(), "Fetched current weather");
        Ok(WeatherRecord::new(body))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::*;

    struct StaticClient(Result<Value, (u16, &'static str)>);

    #[async_trait]
    impl WeatherClient for StaticClient {
        async fn current(&self, _city: &str) -> Result<Map<String, Value>, WeatherError> {
            match &self.0 {
                Ok(Value::Object(map)) => Ok(map.clone()),
                Ok(_) => Err(WeatherError::ParseError("not an object".to_string())),
                Err((status, message)) => Err(WeatherError::Upstream {
                    status: *status,
                    message: (*message).to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn fetch_wraps_body_in_record() {
        let adapter = WeatherAdapter::with_client(StaticClient(Ok(json!({"temp_c": 15}))));

        let record = adapter
            .fetch_current(&City::new("London").unwrap())
            .await
            .unwrap();

        assert_eq!(record.get("temp_c"), Some(&json!(15)));
    }

    #[tokio::test]
    async fn upstream_status_is_kept() {
        let adapter = WeatherAdapter::with_client(StaticClient(Err((503, "boom"))));

        let err = adapter
            .fetch_current(&City::new("London").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Upstream { status: 503, .. }));
        assert_eq!(err.to_string(), "Error fetching weather data: boom");
    }

    #[test]
    fn transport_errors_are_external_service() {
        for err in [
            WeatherError::ConnectionFailed("x".to_string()),
            WeatherError::RequestFailed("x".to_string()),
            WeatherError::ParseError("x".to_string()),
        ] {
            assert!(matches!(
                WeatherAdapter::map_error(err),
                ApplicationError::ExternalService(_)
            ));
        }
    }

    #[test]
    fn with_config_builds_client() {
        assert!(WeatherAdapter::with_config(WeatherApiConfig::with_api_key("k")).is_ok());
    }
}
