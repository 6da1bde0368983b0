//! Audit log entry entity - Records when and where weather data was cached

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::City;

/// Append-only record written once per cache fill
///
/// Field names match the columns of the audit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique identifier of this record
    pub log_id: Uuid,
    /// City whose weather was cached
    pub city: City,
    /// When the cache fill was logged
    pub timestamp: DateTime<Utc>,
    /// URI of the cache object that triggered the record
    pub s3_url: String,
}

impl AuditLogEntry {
    /// Create a new entry with a fresh random id
    pub fn new(city: City, s3_url: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            log_id: Uuid::new_v4(),
            city,
            timestamp,
            s3_url: s3_url.into(),
        }
    }

    /// Timestamp rendered as ISO-8601 with microseconds and a `Z` suffix
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Column name / string value pairs as stored in the table
    pub fn columns(&self) -> [(&'static str, String); 4] {
        [
            ("log_id", self.log_id.to_string()),
            ("city", self.city.to_string()),
            ("timestamp", self.timestamp_iso()),
            ("s3_url", self.s3_url.clone()),
        ]
    }
}
