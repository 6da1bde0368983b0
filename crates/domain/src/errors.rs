//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// City name failed validation
    #[error("Invalid city: {0}")]
    InvalidCity(String),

    /// Object key does not follow the `<city>_<timestamp>.json` layout
    #[error("Invalid cache key: {0}")]
    InvalidCacheKey(String),

    /// Payload is not a JSON object
    #[error("Invalid weather record: {0}")]
    InvalidWeatherRecord(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
