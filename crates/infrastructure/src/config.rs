//! Application configuration
//!
//! Layered loading: built-in defaults, then an optional `geolocate.toml`,
//! then `GEOLOCATE_*` environment variables (`__` separates nested keys,
//! e.g. `GEOLOCATE_GEOCODING__TIMEOUT_SECS=5`).

use std::path::Path;

use integration_geocoding::GeocodingConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::retry::RetryConfig;
use crate::telemetry::LoggingConfig;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "geolocate";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "GEOLOCATE";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding provider settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Caller-side retry policy for transient geocoding failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `geolocate.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the merged
    /// configuration is invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, then the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unparsable, or the merged
    /// configuration is invalid.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.validate().map_err(config::ConfigError::Message)?;

        debug!(base_url = %app.geocoding.base_url, "Configuration loaded");
        Ok(app)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding
            .validate()
            .map_err(|reason| format!("geocoding: {reason}"))?;
        self.retry
            .validate()
            .map_err(|reason| format!("retry: {reason}"))?;
        Ok(())
    }
}
