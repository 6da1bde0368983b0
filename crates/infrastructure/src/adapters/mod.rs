//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod dynamodb_audit_log;
mod s3_object_store;
mod weather_adapter;

pub use dynamodb_audit_log::DynamoDbAuditLog;
pub use s3_object_store::S3ObjectStore;
pub use weather_adapter::WeatherAdapter;
