//! Weather lookup handler

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::HeaderName,
    response::{IntoResponse, Response},
};
use domain::City;
use serde::Deserialize;
use tracing::{Span, debug, field, instrument};

use crate::{error::ApiError, state::AppState};

/// Response header reporting whether the cache served the record
pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache");

/// Query string of `GET /weather/`
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// City to look up
    pub city: Option<String>,
}

/// Current weather for `?city=`, served from cache while fresh
///
/// The body is the provider's JSON object, unmodified. A query string that
/// cannot be decoded is answered with the usual JSON error body.
#[instrument(skip_all, fields(city = field::Empty))]
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if let Some(ref city) = query.city {
        Span::current().record("city", city.as_str());
    }

    let Some(name) = query.city.filter(|c| !c.trim().is_empty()) else {
        return Err(ApiError::BadRequest(
            "Missing required query parameter: city".to_string(),
        ));
    };

    let city = City::new(name).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let (record, status) = state.weather_service.get_weather_with_status(&city).await?;
    debug!(cache = status.as_str(), "Weather lookup complete");

    Ok(([(CACHE_STATUS_HEADER, status.as_str())], Json(record)).into_response())
}
