//! Weather record - opaque JSON payload describing current weather for a city
//!
//! The service imposes no structure on the payload beyond it being a JSON
//! object. Whatever the provider returns is cached and served verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DomainError;

/// Weather attributes for a city at a point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherRecord(Map<String, Value>);

impl WeatherRecord {
    /// Wrap an existing JSON object
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a record from raw JSON bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid JSON or not a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::InvalidWeatherRecord(e.to_string()))?;
        Self::try_from(value)
    }

    /// Serialize the record to JSON bytes
    pub fn to_vec(&self) -> Vec<u8> {
        // A map of JSON values with string keys always serializes
        serde_json::to_vec(&self.0).unwrap_or_default()
    }

    /// Look up a top-level attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of top-level attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying JSON object
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for WeatherRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for WeatherRecord {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(DomainError::InvalidWeatherRecord(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<WeatherRecord> for Value {
    fn from(record: WeatherRecord) -> Self {
        Self::Object(record.0)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
