//! Weather cache expiry configuration.

use serde::{Deserialize, Serialize};

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Minutes a cached record stays fresh (default: 10)
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: u32,
}

const fn default_expiry_minutes() -> u32 {
    10
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: default_expiry_minutes(),
        }
    }
}

impl CacheConfig {
    /// Expiry window as a `chrono::Duration`
    #[must_use]
    pub fn expiry(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.expiry_minutes))
    }
}
