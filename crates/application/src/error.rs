//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every variant is surfaced to the caller as-is; nothing is retried or
/// recovered locally.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (invalid input)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The object store reported a missing resource
    #[error("{0}")]
    NotFound(String),

    /// Object-store call failed for any other reason
    #[error("{0}")]
    Store(String),

    /// Weather provider answered with a non-success status
    #[error("Error fetching weather data: {message}")]
    Upstream {
        /// Status code returned by the provider
        status: u16,
        /// Message reported by the provider
        message: String,
    },

    /// Audit table write failed after the cache write succeeded
    #[error("{0}")]
    Log(String),

    /// Weather provider could not be reached or returned garbage
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error happened after data was already persisted
    pub const fn is_post_commit(&self) -> bool {
        matches!(self, Self::Log(_))
    }
}
