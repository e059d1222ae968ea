//! Raw Nominatim response models
//!
//! These types mirror the provider's `jsonv2` payloads and never leave the
//! crate; resolvers convert them into domain results.

use serde::Deserialize;
use serde_json::Value;

use crate::error::GeocodingError;

/// Nominatim encodes coordinates as strings, other providers as numbers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawDegrees {
    Text(String),
    Number(f64),
}

impl RawDegrees {
    /// Parse the value as degrees, naming `field` in the error
    pub(crate) fn parse(&self, field: &str) -> Result<f64, GeocodingError> {
        let value = match self {
            Self::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                GeocodingError::ProviderProtocolError(format!("invalid {field}: {text:?}"))
            })?,
            Self::Number(number) => *number,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(GeocodingError::ProviderProtocolError(format!(
                "non-finite {field}"
            )))
        }
    }
}

/// A single entry of a `/search` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchPlace {
    pub lat: RawDegrees,
    pub lon: RawDegrees,
    pub display_name: String,
}

/// A `/reverse` response
///
/// When no address exists the provider answers with an `error` member
/// (`{"error": "Unable to geocode"}`) instead of a place.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReversePlace {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// A `/status?format=json` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderStatus {
    pub status: i64,
    #[serde(default)]
    pub message: Option<String>,
}
