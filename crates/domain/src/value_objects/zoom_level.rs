//! Reverse geocoding precision

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Level of detail requested from a reverse lookup
///
/// Follows the provider's zoom scale: 0 is the coarsest (country), 18 the
/// finest (building).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    /// Highest supported zoom
    pub const MAX: u8 = 18;

    /// Country level
    pub const COUNTRY: Self = Self(3);
    /// State level
    pub const STATE: Self = Self(5);
    /// County level
    pub const COUNTY: Self = Self(8);
    /// Town or city level
    pub const CITY: Self = Self(10);
    /// Suburb level
    pub const SUBURB: Self = Self(14);
    /// Major and minor streets
    pub const MAJOR_STREETS: Self = Self(16);
    /// Building level
    pub const BUILDING: Self = Self(18);

    /// Create a zoom level
    ///
    /// # Errors
    ///
    /// Returns `InvalidZoom` if `level` is above [`ZoomLevel::MAX`].
    pub const fn new(level: u8) -> Result<Self, DomainError> {
        if level > Self::MAX {
            return Err(DomainError::InvalidZoom(level));
        }
        Ok(Self(level))
    }

    /// Get the raw zoom value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::CITY
    }
}

impl TryFrom<u8> for ZoomLevel {
    type Error = DomainError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(zoom: ZoomLevel) -> Self {
        zoom.0
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
