//! Structured place query for forward geocoding

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A place described by locality, region and country
///
/// The fields are sent to the provider as separate filter terms rather than a
/// single free-text string, so "Springfield" in two different states stays
/// unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceQuery {
    /// City, town or village name (required)
    pub locality: String,
    /// State, province or region (may be empty)
    #[serde(default)]
    pub region: String,
    /// Country name or code (required)
    pub country: String,
}

impl PlaceQuery {
    /// Create a new place query
    pub fn new(
        locality: impl Into<String>,
        region: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            locality: locality.into(),
            region: region.into(),
            country: country.into(),
        }
    }

    /// Check that locality and country are non-empty after trimming
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.locality.trim().is_empty() {
            return Err(DomainError::invalid_query("locality must not be empty"));
        }
        if self.country.trim().is_empty() {
            return Err(DomainError::invalid_query("country must not be empty"));
        }
        Ok(())
    }

    /// Trimmed region, or `None` when it is blank
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        let region = self.region.trim();
        (!region.is_empty()).then_some(region)
    }
}

impl fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [
            self.locality.trim(),
            self.region.trim(),
            self.country.trim(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
        write!(f, "{}", parts.join(", "))
    }
}
