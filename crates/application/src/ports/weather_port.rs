//! Weather service port
//!
//! Defines the interface for live weather retrieval on a cache miss.

use async_trait::async_trait;
use domain::{City, WeatherRecord};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the upstream weather provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch current weather for a city
    ///
    /// A non-success answer from the provider is reported as
    /// [`ApplicationError::Upstream`] with the provider's status and message.
    async fn fetch_current(&self, city: &City) -> Result<WeatherRecord, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherPort>();
    }
}
