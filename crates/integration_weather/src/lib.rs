//! WeatherAPI.com integration
//!
//! Client for the WeatherAPI.com current-conditions endpoint
//! (<https://www.weatherapi.com/docs/>). Responses are returned as raw JSON
//! objects; nothing is reshaped.

pub mod client;

pub use client::{WeatherApiClient, WeatherApiConfig, WeatherClient, WeatherError};
