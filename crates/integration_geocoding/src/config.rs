//! Geocoding client configuration

use domain::ZoomLevel;
use serde::{Deserialize, Serialize};

/// Configuration for the geocoding provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client identification sent as `User-Agent` on every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Preferred response language (e.g., "en", "de,en"); empty for provider default
    #[serde(default)]
    pub accept_language: String,

    /// Zoom used by reverse lookups when the caller does not pick one
    #[serde(default)]
    pub default_zoom: ZoomLevel,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("geolocate/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept_language: String::new(),
            default_zoom: ZoomLevel::default(),
        }
    }
}

impl GeocodingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: "geolocate-tests".to_string(),
            ..Default::default()
        }
    }

    /// Point the configuration at another provider endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build an endpoint URL below the base URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if let Err(e) = reqwest::Url::parse(&self.base_url) {
            return Err(format!("base_url {:?} is not a valid URL: {e}", self.base_url));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeocodingConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.starts_with("geolocate/"));
        assert!(config.accept_language.is_empty());
        assert_eq!(config.default_zoom, ZoomLevel::CITY);
    }

    #[test]
    fn test_testing_config() {
        let config = GeocodingConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "geolocate-tests");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = GeocodingConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(config.endpoint("search"), "http://localhost:8080/search");

        let config = GeocodingConfig::default().with_base_url("http://localhost:8080/nominatim");
        assert_eq!(
            config.endpoint("reverse"),
            "http://localhost:8080/nominatim/reverse"
        );
    }

    #[test]
    fn test_validation_success() {
        assert!(GeocodingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = GeocodingConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unparsable_base_url() {
        let config = GeocodingConfig::for_testing().with_base_url("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.contains("base_url"));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = GeocodingConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_blank_user_agent() {
        let config = GeocodingConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("user_agent"));
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: GeocodingConfig =
            serde_json::from_str(r#"{"timeout_secs": 3, "default_zoom": 14}"#).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.default_zoom, ZoomLevel::SUBURB);
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_zoom() {
        let result = serde_json::from_str::<GeocodingConfig>(r#"{"default_zoom": 30}"#);
        assert!(result.is_err());
    }
}
