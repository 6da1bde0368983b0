//! Application state shared across handlers

use std::sync::Arc;

use application::WeatherService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside weather lookup
    pub weather_service: Arc<WeatherService>,
}

impl AppState {
    /// Wrap a weather service
    #[must_use]
    pub fn new(weather_service: WeatherService) -> Self {
        Self {
            weather_service: Arc::new(weather_service),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("weather_service", &"WeatherService")
            .finish()
    }
}
