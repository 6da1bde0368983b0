//! Audit logger - one append-only record per cache fill

use std::{fmt, sync::Arc};

use domain::{AuditLogEntry, City};
use tracing::{debug, instrument};

use super::cache_store::message;
use crate::{
    error::ApplicationError,
    ports::{AuditLogPort, Clock},
};

/// Writes audit records describing where weather data was cached
pub struct AuditLogger {
    log: Arc<dyn AuditLogPort>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogger")
            .field("table", &self.log.table())
            .finish_non_exhaustive()
    }
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log: Arc<dyn AuditLogPort>, clock: Arc<dyn Clock>) -> Self {
        Self { log, clock }
    }

    /// Append a record for `city` pointing at the cache object `uri`
    ///
    /// # Errors
    ///
    /// [`ApplicationError::Log`] if the table write fails.
    #[instrument(skip(self), fields(city = %city))]
    pub async fn record(&self, city: &City, uri: &str) -> Result<AuditLogEntry, ApplicationError> {
        let entry = AuditLogEntry::new(city.clone(), uri, self.clock.now());

        self.log.append(&entry).await.map_err(|e| {
            ApplicationError::Log(format!(
                "Error logging event to {}: {}",
                self.log.table(),
                message(e)
            ))
        })?;

        debug!(log_id = %entry.log_id, "Audit record written");
        Ok(entry)
    }
}
