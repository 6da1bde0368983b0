//! In-memory port implementations shared by the service tests

use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::{AuditLogEntry, CacheEntry, City, WeatherRecord};
use parking_lot::Mutex;
use serde_json::Value;

use crate::{
    error::ApplicationError,
    ports::{AuditLogPort, Clock, ObjectStorePort, WeatherPort},
};

pub fn record(value: Value) -> WeatherRecord {
    WeatherRecord::try_from(value).unwrap()
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

struct StoredObject {
    body: Vec<u8>,
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// Object store that stamps objects with the shared manual clock
pub struct MemoryObjectStore {
    clock: Arc<ManualClock>,
    objects: Mutex<BTreeMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            clock,
            objects: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().keys().cloned().collect()
    }

    pub fn object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .lock()
            .get(key)
            .map(|o| (o.body.clone(), o.content_type.clone()))
    }
}

#[async_trait]
impl ObjectStorePort for MemoryObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<CacheEntry>, ApplicationError> {
        Ok(self
            .objects
            .lock()
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, o)| CacheEntry::new(key.clone(), o.last_modified, o.body.len() as u64))
            .collect())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, ApplicationError> {
        self.objects
            .lock()
            .get(key)
            .map(|o| o.body.clone())
            .ok_or_else(|| ApplicationError::NotFound(format!("NoSuchKey: {key}")))
    }

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApplicationError> {
        let object = StoredObject {
            body,
            content_type: content_type.to_string(),
            last_modified: self.clock.now(),
        };
        self.objects.lock().insert(key.to_string(), object);
        Ok(())
    }

    fn bucket(&self) -> &str {
        "weather-cache"
    }
}

/// Audit log that keeps entries in memory and can be told to fail
#[derive(Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditLogEntry>>,
    failing: bool,
}

impl MemoryAuditLog {
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().clone()
    }
}

#[async_trait]
impl AuditLogPort for MemoryAuditLog {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), ApplicationError> {
        if self.failing {
            return Err(ApplicationError::Log("ProvisionedThroughputExceeded".to_string()));
        }
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn table(&self) -> &str {
        "weather-audit"
    }
}

/// Weather provider returning a fixed payload and counting calls
pub struct CountingWeather {
    response: Result<WeatherRecord, (u16, String)>,
    calls: AtomicUsize,
}

impl CountingWeather {
    pub fn returning(record: WeatherRecord) -> Self {
        Self {
            response: Ok(record),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            response: Err((status, message.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherPort for CountingWeather {
    async fn fetch_current(&self, _city: &City) -> Result<WeatherRecord, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent callers interleave like real network calls
        tokio::task::yield_now().await;
        self.response
            .clone()
            .map_err(|(status, message)| ApplicationError::Upstream { status, message })
    }
}
