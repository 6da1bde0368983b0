//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the S3, DynamoDB and WeatherAPI.com adapters, configuration
//! loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, AuditConfig, AwsConfig, CacheConfig, LoggingConfig, ServerConfig, StorageConfig,
    WeatherConfig,
};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
