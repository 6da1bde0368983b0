//! Object-store key for cached weather payloads
//!
//! Keys have the layout `<city>_<unix-seconds>.<micros>.json`. Building and
//! parsing happen only here so that callers never concatenate key strings.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::City};

const SEPARATOR: char = '_';
const EXTENSION: &str = ".json";

/// Key under which one cached weather payload is stored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build the key for `city` cached at `timestamp`
    ///
    /// The timestamp is rendered as fractional unix seconds with microsecond
    /// precision.
    pub fn new(city: &City, timestamp: DateTime<Utc>) -> Self {
        Self(format!(
            "{}{SEPARATOR}{}.{:06}{EXTENSION}",
            city.as_str(),
            timestamp.timestamp(),
            timestamp.timestamp_subsec_micros()
        ))
    }

    /// Listing prefix shared by every key of `city`
    pub fn prefix(city: &City) -> String {
        format!("{}{SEPARATOR}", city.as_str())
    }

    /// Split a stored key back into its city and timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not follow the cache key layout.
    pub fn parse(key: &str) -> Result<(City, DateTime<Utc>), DomainError> {
        let invalid = || DomainError::InvalidCacheKey(key.to_string());

        let stem = key.strip_suffix(EXTENSION).ok_or_else(invalid)?;
        let (city, stamp) = stem.rsplit_once(SEPARATOR).ok_or_else(invalid)?;

        let (secs, frac) = stamp.split_once('.').unwrap_or((stamp, "0"));
        let secs: i64 = secs.parse().map_err(|_| invalid())?;
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Right-pad or truncate to six digits
        let micros: String = frac.chars().chain(std::iter::repeat('0')).take(6).collect();
        let micros: u32 = micros.parse().map_err(|_| invalid())?;

        let timestamp = Utc
            .timestamp_opt(secs, micros * 1_000)
            .single()
            .ok_or_else(invalid)?;
        let city = City::new(city).map_err(|_| invalid())?;

        Ok((city, timestamp))
    }

    /// Check whether this key belongs to exactly `city`
    ///
    /// A plain prefix match would also accept `London_Ontario_...` for
    /// `London`.
    pub fn belongs_to(key: &str, city: &City) -> bool {
        Self::parse(key).is_ok_and(|(parsed, _)| &parsed == city)
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the `s3://bucket/key` URI of this key
    pub fn to_uri(&self, bucket: &str) -> String {
        format!("s3://{bucket}/{}", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str) -> City {
        City::new(name).unwrap()
    }

    #[test]
    fn new_formats_city_and_timestamp() {
        let ts = Utc.timestamp_opt(1_700_000_000, 123_456_000).unwrap();
        let key = CacheKey::new(&city("London"), ts);
        assert_eq!(key.as_str(), "London_1700000000.123456.json");
    }

    #[test]
    fn new_pads_microseconds() {
        let ts = Utc.timestamp_opt(1_700_000_000, 42_000).unwrap();
        let key = CacheKey::new(&city("Oslo"), ts);
        assert_eq!(key.as_str(), "Oslo_1700000000.000042.json");
    }

    #[test]
    fn prefix_ends_with_separator() {
        assert_eq!(CacheKey::prefix(&city("Paris")), "Paris_");
    }

    #[test]
    fn parse_recovers_city_and_timestamp() {
        let ts = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        let key = CacheKey::new(&city("New York"), ts);
        let (parsed_city, parsed_ts) = CacheKey::parse(key.as_str()).unwrap();
        assert_eq!(parsed_city.as_str(), "New York");
        assert_eq!(parsed_ts, ts);
    }

    #[test]
    fn parse_handles_underscores_in_city() {
        let (parsed, _) = CacheKey::parse("London_Ontario_1700000000.5.json").unwrap();
        assert_eq!(parsed.as_str(), "London_Ontario");
    }

    #[test]
    fn parse_accepts_python_style_timestamps() {
        let (_, ts) = CacheKey::parse("London_1700000000.1234567.json").unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert_eq!(ts.timestamp_subsec_micros(), 123_456);

        let (_, ts) = CacheKey::parse("London_1700000000.json").unwrap();
        assert_eq!(ts.timestamp_subsec_micros(), 0);
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        assert!(CacheKey::parse("London.json").is_err());
        assert!(CacheKey::parse("London_abc.json").is_err());
        assert!(CacheKey::parse("London_1700000000.12x.json").is_err());
        assert!(CacheKey::parse("London_1700000000.").is_err());
        assert!(CacheKey::parse("_1700000000.json").is_err());
        assert!(CacheKey::parse("London_1700000000.txt").is_err());
    }

    #[test]
    fn belongs_to_requires_exact_city() {
        let london = city("London");
        assert!(CacheKey::belongs_to("London_1700000000.0.json", &london));
        assert!(!CacheKey::belongs_to("London_Ontario_1700000000.0.json", &london));
        assert!(!CacheKey::belongs_to("Londonderry_1700000000.0.json", &london));
    }

    #[test]
    fn to_uri_uses_s3_scheme() {
        let key = CacheKey::new(&city("Rome"), Utc.timestamp_opt(10, 0).unwrap());
        assert_eq!(key.to_uri("weather"), "s3://weather/Rome_10.000000.json");
    }
}
