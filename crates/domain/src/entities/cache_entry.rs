//! Cache entries as seen in an object-store listing

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of one stored object, as returned by a prefix listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Full object key
    pub key: String,
    /// Modification time assigned by the object store
    pub last_modified: DateTime<Utc>,
    /// Object size in bytes
    pub size: u64,
}

impl CacheEntry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, last_modified: DateTime<Utc>, size: u64) -> Self {
        Self {
            key: key.into(),
            last_modified,
            size,
        }
    }

    /// Age of the entry relative to `now`
    ///
    /// Negative when the store clock runs ahead of ours.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_modified
    }

    /// Whether the entry is younger than `expiry` at `now`
    ///
    /// An entry whose age equals the expiry window is stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, expiry: Duration) -> bool {
        self.age(now) < expiry
    }

    /// Pick the authoritative entry: newest modification time, ties broken
    /// by the greatest key
    pub fn newest<'a, I>(entries: I) -> Option<&'a Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        entries
            .into_iter()
            .max_by(|a, b| a.last_modified.cmp(&b.last_modified).then_with(|| a.key.cmp(&b.key)))
    }
}
