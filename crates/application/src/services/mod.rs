//! Application services - Use case implementations

mod audit_logger;
mod cache_store;
#[cfg(test)]
mod test_support;
mod weather_service;

pub use audit_logger::AuditLogger;
pub use cache_store::CacheStore;
pub use weather_service::{AuditPolicy, CacheStatus, WeatherService};
