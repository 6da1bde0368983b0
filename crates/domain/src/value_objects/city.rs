//! City value object with validation
//!
//! A city name as requested by a client. The name becomes part of an
//! object-store key, so path separators and control characters are rejected.
//!
//! # Examples
//!
//! ```
//! use domain::City;
//!
//! let city = City::new("  London ").unwrap();
//! assert_eq!(city.as_str(), "London");
//!
//! assert!(City::new("").is_err());
//! assert!(City::new("a/b").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated city name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct City {
    #[validate(length(min = 1, max = 100))]
    value: String,
}

impl City {
    /// Create a new city, trimming surrounding whitespace
    ///
    /// Case is preserved: `London` and `london` are different cache keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, too long, or contains `/`, `\`
    /// or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let value = name.into().trim().to_string();

        if value.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
            return Err(DomainError::InvalidCity(format!(
                "'{value}' contains path separators or control characters"
            )));
        }

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidCity(e.to_string()))?;

        Ok(candidate)
    }

    /// Get the city as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for City {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<String> for City {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for City {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<City> for String {
    fn from(city: City) -> Self {
        city.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(City::new("London").is_ok());
        assert!(City::new("New York").is_ok());
        assert!(City::new("São Paulo").is_ok());
        assert!(City::new("Saint-Étienne").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let city = City::new("\tParis  ").unwrap();
        assert_eq!(city.as_str(), "Paris");
    }

    #[test]
    fn preserves_case() {
        let city = City::new("berlin").unwrap();
        assert_eq!(city.to_string(), "berlin");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(City::new("").is_err());
        assert!(City::new("   ").is_err());
    }

    #[test]
    fn rejects_path_separators() {
        assert!(City::new("../etc").is_err());
        assert!(City::new("a\\b").is_err());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(City::new("Lon\ndon").is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "x".repeat(101);
        assert!(City::new(name).is_err());
        let name = "x".repeat(100);
        assert!(City::new(name).is_ok());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let city: City = serde_json::from_str("\"Oslo\"").unwrap();
        assert_eq!(city.as_str(), "Oslo");
        assert!(serde_json::from_str::<City>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&city).unwrap(), "\"Oslo\"");
    }
}
