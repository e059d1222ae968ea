//! Geocoding error types

use domain::DomainError;
use thiserror::Error;

/// Classified outcome of a failed geocoding call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodingError {
    /// Place query failed local validation
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Coordinate outside the valid latitude/longitude range
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// Request did not complete within the configured timeout
    #[error("Geocoding request timed out after {timeout_secs} seconds")]
    NetworkTimeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Provider could not be reached (DNS, refused connection, TLS)
    #[error("Geocoding provider unavailable: {0}")]
    NetworkUnavailable(String),

    /// Provider answered with a non-success HTTP status
    #[error("Geocoding provider returned HTTP {status}")]
    ProviderError {
        /// HTTP status code
        status: u16,
    },

    /// No place matched the query
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// No address is known for the coordinate
    #[error("Address not found for ({latitude}, {longitude})")]
    AddressNotFound {
        /// Requested latitude
        latitude: f64,
        /// Requested longitude
        longitude: f64,
    },

    /// Provider response did not have the expected shape
    #[error("Geocoding protocol error: {0}")]
    ProviderProtocolError(String),

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GeocodingError {
    /// Returns true if repeating the call may succeed
    ///
    /// Rate limiting (429) and server-side failures (5xx) count as transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkTimeout { .. } | Self::NetworkUnavailable(_) => true,
            Self::ProviderError { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns true for a well-formed request that had no match
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LocationNotFound(_) | Self::AddressNotFound { .. }
        )
    }

    /// Returns true if the caller's input was rejected before any network call
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuery(_) | Self::InvalidCoordinate { .. }
        )
    }
}

impl From<DomainError> for GeocodingError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidQuery(reason) => Self::InvalidQuery(reason),
            DomainError::InvalidCoordinate {
                latitude,
                longitude,
            } => Self::InvalidCoordinate {
                latitude,
                longitude,
            },
            DomainError::InvalidZoom(level) => {
                Self::Configuration(DomainError::InvalidZoom(level).to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GeocodingError::NetworkTimeout { timeout_secs: 10 }.is_retryable());
        assert!(GeocodingError::NetworkUnavailable("refused".to_string()).is_retryable());
        assert!(GeocodingError::ProviderError { status: 503 }.is_retryable());
        assert!(GeocodingError::ProviderError { status: 429 }.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!GeocodingError::ProviderError { status: 400 }.is_retryable());
        assert!(!GeocodingError::InvalidQuery("test".to_string()).is_retryable());
        assert!(!GeocodingError::LocationNotFound("test".to_string()).is_retryable());
        assert!(!GeocodingError::ProviderProtocolError("test".to_string()).is_retryable());
        assert!(
            !GeocodingError::AddressNotFound {
                latitude: 0.0,
                longitude: -170.0,
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_not_found_is_distinct_from_failures() {
        assert!(GeocodingError::LocationNotFound("Zzzznotaplace".to_string()).is_not_found());
        assert!(
            GeocodingError::AddressNotFound {
                latitude: 0.0,
                longitude: -170.0,
            }
            .is_not_found()
        );
        assert!(!GeocodingError::ProviderError { status: 404 }.is_not_found());
        assert!(!GeocodingError::ProviderProtocolError("bad".to_string()).is_not_found());
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: GeocodingError = DomainError::invalid_query("country must not be empty").into();
        assert!(err.is_invalid_input());
        assert_eq!(
            err,
            GeocodingError::InvalidQuery("country must not be empty".to_string())
        );

        let err: GeocodingError = DomainError::InvalidCoordinate {
            latitude: 95.0,
            longitude: 0.0,
        }
        .into();
        assert!(matches!(
            err,
            GeocodingError::InvalidCoordinate { latitude, .. } if (latitude - 95.0).abs() < f64::EPSILON
        ));

        let err: GeocodingError = DomainError::InvalidZoom(30).into();
        assert!(matches!(err, GeocodingError::Configuration(_)));
    }

    #[test]
    fn test_error_display() {
        let err = GeocodingError::ProviderError { status: 503 };
        assert!(err.to_string().contains("503"));

        let err = GeocodingError::NetworkTimeout { timeout_secs: 10 };
        assert!(err.to_string().contains("timed out"));

        let err = GeocodingError::LocationNotFound("Zzzznotaplace, US".to_string());
        assert!(err.to_string().contains("Zzzznotaplace"));
    }
}
