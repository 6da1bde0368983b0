//! Domain entities - Objects with identity and lifecycle

mod audit_entry;
mod cache_entry;
mod weather_record;

pub use audit_entry::AuditLogEntry;
pub use cache_entry::CacheEntry;
pub use weather_record::WeatherRecord;
