//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `aws`: credentials, S3 bucket, audit table
//! - `integrations`: WeatherAPI.com
//! - `cache`: expiry window
//! - `logging`: log filter

mod aws;
mod cache;
mod integrations;
mod logging;
mod server;

use application::{AuditPolicy, error::ApplicationError};
use serde::{Deserialize, Serialize};

pub use aws::{AuditConfig, AwsConfig, StorageConfig};
pub use cache::CacheConfig;
pub use integrations::WeatherConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;

/// Environment variable prefix, e.g. `WEATHERCACHE__STORAGE__BUCKET_NAME`
pub const ENV_PREFIX: &str = "WEATHERCACHE";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// AWS credentials and region
    #[serde(default)]
    pub aws: AwsConfig,

    /// Object storage for cached records
    #[serde(default)]
    pub storage: StorageConfig,

    /// Audit table
    #[serde(default)]
    pub audit: AuditConfig,

    /// Weather provider
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Cache expiry
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)
    }

    /// Load configuration from environment and optional file
    ///
    /// Sources in increasing precedence: built-in defaults, `config.toml` in
    /// the working directory, `WEATHERCACHE__<SECTION>__<KEY>` variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = Self::builder()?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., WEATHERCACHE__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration from a TOML document on top of the defaults
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Check that every setting the service cannot run without is present
    ///
    /// # Errors
    ///
    /// [`ApplicationError::Configuration`] listing every missing or invalid
    /// setting.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let mut problems = Vec::new();

        if self.storage.bucket_name.trim().is_empty() {
            problems.push("storage.bucket_name is required");
        }
        if self.audit.table_name.trim().is_empty() {
            problems.push("audit.table_name is required");
        }
        if self.weather.api_key_str().trim().is_empty() {
            problems.push("weather.api_key is required");
        }
        if self.aws.access_key_str().is_empty() || self.aws.secret_key_str().is_empty() {
            problems.push("aws.access_key and aws.secret_key are required");
        }
        if self.cache.expiry_minutes == 0 {
            problems.push("cache.expiry_minutes must be greater than zero");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::Configuration(problems.join("; ")))
        }
    }

    /// Audit failure policy derived from `audit.strict`
    #[must_use]
    pub const fn audit_policy(&self) -> AuditPolicy {
        AuditPolicy::from_strict(self.audit.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        [server]
        port = 9000
        log_format = "json"

        [aws]
        access_key = "AKIAEXAMPLE"
        secret_key = "secret"
        region = "eu-west-1"
        endpoint = "http://localhost:4566"

        [storage]
        bucket_name = "weather-cache"

        [audit]
        table_name = "weather-audit"
        strict = false

        [weather]
        api_key = "key-123"

        [cache]
        expiry_minutes = 15
    "#;

    #[test]
    fn from_toml_reads_every_section() {
        let config = AppConfig::from_toml(FULL).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.log_format, "json");
        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.aws.endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.storage.bucket_name, "weather-cache");
        assert_eq!(config.audit.table_name, "weather-audit");
        assert_eq!(config.weather.api_key_str(), "key-123");
        assert_eq!(config.cache.expiry_minutes, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn audit_policy_follows_strict_flag() {
        let config = AppConfig::from_toml(FULL).unwrap();
        assert_eq!(config.audit_policy(), AuditPolicy::Lenient);
        assert_eq!(AppConfig::default().audit_policy(), AuditPolicy::Strict);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.cache.expiry_minutes, 10);
        assert_eq!(config.weather.base_url, "http://api.weatherapi.com/v1");
        assert!(config.audit.strict);
    }

    #[test]
    fn validate_lists_missing_settings() {
        let err = AppConfig::default().validate().unwrap_err();
        let msg = err.to_string();

        assert!(matches!(err, ApplicationError::Configuration(_)));
        assert!(msg.contains("storage.bucket_name"));
        assert!(msg.contains("audit.table_name"));
        assert!(msg.contains("weather.api_key"));
        assert!(msg.contains("aws.access_key"));
    }

    #[test]
    fn validate_rejects_zero_expiry() {
        let mut config = AppConfig::from_toml(FULL).unwrap();
        config.cache.expiry_minutes = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache.expiry_minutes"));
    }
}
