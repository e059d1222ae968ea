//! Domain-level errors

use thiserror::Error;

/// Errors raised when caller-supplied input fails local validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A required place query field is missing
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Coordinate outside latitude [-90, 90] or longitude [-180, 180]
    #[error(
        "Invalid coordinate ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinate {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// Zoom level above the provider maximum
    #[error("Invalid zoom level {0}: must be between 0 and {max}", max = crate::ZoomLevel::MAX)]
    InvalidZoom(u8),
}

impl DomainError {
    /// Create an invalid query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery(reason.into())
    }
}
