//! Geocoding results

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Coordinate;

/// Best match of a forward lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    latitude: f64,
    longitude: f64,
    display_address: String,
}

impl GeocodeResult {
    /// Create a new forward geocoding result
    pub fn new(latitude: f64, longitude: f64, display_address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            display_address: display_address.into(),
        }
    }

    /// Latitude of the match
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude of the match
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Provider-formatted canonical address
    #[must_use]
    pub fn display_address(&self) -> &str {
        &self.display_address
    }

    /// Position of the match as a coordinate
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl fmt::Display for GeocodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_address, self.coordinate())
    }
}

/// Best match of a reverse lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseResult {
    display_address: String,
}

impl ReverseResult {
    /// Create a new reverse geocoding result
    pub fn new(display_address: impl Into<String>) -> Self {
        Self {
            display_address: display_address.into(),
        }
    }

    /// Provider-formatted address
    #[must_use]
    pub fn display_address(&self) -> &str {
        &self.display_address
    }

    /// Consume the result, returning the address
    #[must_use]
    pub fn into_display_address(self) -> String {
        self.display_address
    }
}

impl fmt::Display for ReverseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_address)
    }
}
