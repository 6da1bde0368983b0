//! Cache store - time-boxed weather cache on top of an object store
//!
//! Every fill writes a new object `<city>_<timestamp>.json`; nothing is
//! overwritten or pruned. A lookup lists the city's objects, takes the most
//! recently modified one and serves it while it is younger than the expiry
//! window. The same object is used for the freshness check and for the read.

use std::{fmt, sync::Arc};

use chrono::Duration;
use domain::{CacheEntry, CacheKey, City, WeatherRecord};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{Clock, ObjectStorePort},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Weather cache backed by an object store
pub struct CacheStore {
    objects: Arc<dyn ObjectStorePort>,
    clock: Arc<dyn Clock>,
    expiry: Duration,
}

impl fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("bucket", &self.objects.bucket())
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl CacheStore {
    /// Create a cache store with the given expiry window
    pub fn new(objects: Arc<dyn ObjectStorePort>, clock: Arc<dyn Clock>, expiry: Duration) -> Self {
        Self {
            objects,
            clock,
            expiry,
        }
    }

    /// Expiry window after which a cached record is stale
    pub const fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Return the cached record for `city` if a fresh one exists
    ///
    /// `Ok(None)` is a cache miss: either nothing is cached or the newest
    /// entry is at least `expiry` old.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::NotFound`] when the store reports a missing
    /// resource, [`ApplicationError::Store`] for any other store failure or an
    /// unreadable cached body.
    #[instrument(skip(self), fields(city = %city))]
    pub async fn lookup(&self, city: &City) -> Result<Option<WeatherRecord>, ApplicationError> {
        let listing = self
            .objects
            .list(&CacheKey::prefix(city))
            .await
            .map_err(|e| read_error(city, e))?;

        let entries: Vec<CacheEntry> = listing
            .into_iter()
            .filter(|entry| CacheKey::belongs_to(&entry.key, city))
            .collect();

        let Some(newest) = CacheEntry::newest(&entries) else {
            debug!("No cached entry");
            return Ok(None);
        };

        let age = newest.age(self.clock.now());
        if age >= self.expiry {
            debug!(
                key = %newest.key,
                age_secs = age.num_seconds(),
                entries = entries.len(),
                "Cached entry expired"
            );
            return Ok(None);
        }

        let body = self
            .objects
            .get(&newest.key)
            .await
            .map_err(|e| read_error(city, e))?;

        let record = WeatherRecord::from_slice(&body).map_err(|e| {
            ApplicationError::Store(format!(
                "Error accessing S3: corrupt cache entry {}: {e}",
                newest.key
            ))
        })?;

        debug!(key = %newest.key, age_secs = age.num_seconds(), "Cache hit");
        Ok(Some(record))
    }

    /// Write `record` under a freshly generated key and return its URI
    ///
    /// # Errors
    ///
    /// [`ApplicationError::Store`] if the write fails.
    #[instrument(skip(self, record), fields(city = %city))]
    pub async fn store(
        &self,
        city: &City,
        record: &WeatherRecord,
    ) -> Result<String, ApplicationError> {
        let key = CacheKey::new(city, self.clock.now());

        self.objects
            .put(key.as_str(), record.to_vec(), JSON_CONTENT_TYPE)
            .await
            .map_err(|e| ApplicationError::Store(format!("Error caching data: {}", message(e))))?;

        let uri = key.to_uri(self.objects.bucket());
        info!(uri = %uri, "Cached weather data");
        Ok(uri)
    }
}

fn read_error(city: &City, err: ApplicationError) -> ApplicationError {
    match err {
        ApplicationError::NotFound(_) => {
            ApplicationError::NotFound(format!("No cache found for city: {city}"))
        },
        other => ApplicationError::Store(format!("Error accessing S3: {}", message(other))),
    }
}

/// Store-reported message without our own prefixes
pub(crate) fn message(err: ApplicationError) -> String {
    match err {
        ApplicationError::NotFound(msg)
        | ApplicationError::Store(msg)
        | ApplicationError::Log(msg) => msg,
        other => other.to_string(),
    }
}
