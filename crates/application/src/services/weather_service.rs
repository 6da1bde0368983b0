//! Weather service - request-level orchestration
//!
//! Cache lookup, then on a miss a live fetch followed by a cache write and an
//! audit record. Every step is awaited in order; nothing is retried and
//! concurrent misses for the same city are not coalesced.

use std::{fmt, sync::Arc};

use domain::{City, WeatherRecord};
use tracing::{debug, info, instrument, warn};

use super::{AuditLogger, CacheStore};
use crate::{error::ApplicationError, ports::WeatherPort};

/// What to do when the audit write fails after the cache write succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditPolicy {
    /// Fail the request; the cache entry stays in place
    #[default]
    Strict,
    /// Log a warning and return the fetched record
    Lenient,
}

impl AuditPolicy {
    /// Policy from the `audit.strict` configuration flag
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }
}

/// Where a returned record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from a fresh cache entry
    Hit,
    /// Fetched live and written to the cache
    Miss,
}

impl CacheStatus {
    /// Header-friendly name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

/// Orchestrates cache, weather provider and audit log for one request
pub struct WeatherService {
    cache: CacheStore,
    weather: Arc<dyn WeatherPort>,
    audit: AuditLogger,
    audit_policy: AuditPolicy,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService")
            .field("cache", &self.cache)
            .field("audit", &self.audit)
            .field("audit_policy", &self.audit_policy)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a new weather service with the strict audit policy
    pub fn new(cache: CacheStore, weather: Arc<dyn WeatherPort>, audit: AuditLogger) -> Self {
        Self {
            cache,
            weather,
            audit,
            audit_policy: AuditPolicy::Strict,
        }
    }

    /// Set the audit failure policy
    #[must_use]
    pub const fn with_audit_policy(mut self, policy: AuditPolicy) -> Self {
        self.audit_policy = policy;
        self
    }

    /// Current weather for `city`
    ///
    /// # Errors
    ///
    /// Propagates cache, provider and (under [`AuditPolicy::Strict`]) audit
    /// failures unchanged.
    pub async fn get_weather(&self, city: &City) -> Result<WeatherRecord, ApplicationError> {
        self.get_weather_with_status(city)
            .await
            .map(|(record, _)| record)
    }

    /// Current weather for `city` together with whether the cache served it
    ///
    /// # Errors
    ///
    /// See [`WeatherService::get_weather`].
    #[instrument(skip(self), fields(city = %city))]
    pub async fn get_weather_with_status(
        &self,
        city: &City,
    ) -> Result<(WeatherRecord, CacheStatus), ApplicationError> {
        if let Some(record) = self.cache.lookup(city).await? {
            debug!("Serving cached weather");
            return Ok((record, CacheStatus::Hit));
        }

        let record = self.weather.fetch_current(city).await?;
        let uri = self.cache.store(city, &record).await?;

        match self.audit.record(city, &uri).await {
            Ok(entry) => {
                info!(log_id = %entry.log_id, uri = %uri, "Fetched and cached weather");
            },
            Err(e) if self.audit_policy == AuditPolicy::Lenient => {
                warn!(error = %e, uri = %uri, "Audit write failed, returning fetched weather");
            },
            Err(e) => return Err(e),
        }

        Ok((record, CacheStatus::Miss))
    }
}
