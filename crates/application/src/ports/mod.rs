//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod audit_log;
mod clock;
mod object_store_port;
mod weather_port;

#[cfg(test)]
pub use audit_log::MockAuditLogPort;
pub use audit_log::AuditLogPort;
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use object_store_port::MockObjectStorePort;
pub use object_store_port::ObjectStorePort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;
