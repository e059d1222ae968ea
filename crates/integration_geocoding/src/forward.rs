//! Forward geocoding: place query to coordinates

use std::fmt;
use std::sync::Arc;

use domain::{GeocodeResult, PlaceQuery};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::models::SearchPlace;
use crate::transport::{ProviderRequest, Transport};

/// Resolves a [`PlaceQuery`] to its best-ranked match
pub struct ForwardResolver {
    transport: Arc<dyn Transport>,
    config: GeocodingConfig,
}

impl fmt::Debug for ForwardResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ForwardResolver {
    /// Create a resolver sending requests through `transport`
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the configuration is invalid.
    pub fn new(
        transport: Arc<dyn Transport>,
        config: GeocodingConfig,
    ) -> Result<Self, GeocodingError> {
        config.validate().map_err(GeocodingError::Configuration)?;
        Ok(Self { transport, config })
    }

    /// Resolve a place query to coordinates and a canonical address
    ///
    /// Invalid queries are rejected before any request is sent. The provider
    /// ranks matches; the first one is returned as-is.
    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn resolve(&self, query: &PlaceQuery) -> Result<GeocodeResult, GeocodingError> {
        query.validate()?;

        let request = self.build_request(query)?;
        debug!("Geocoding place");

        let payload = self.transport.send(request).await?;
        let result = Self::interpret(query, payload);

        match &result {
            Ok(found) => debug!(
                latitude = found.latitude(),
                longitude = found.longitude(),
                "Geocoded place"
            ),
            Err(GeocodingError::ProviderProtocolError(reason)) => {
                warn!(%reason, "Unexpected search response from geocoding provider");
            },
            Err(_) => {},
        }

        result
    }

    /// Build the structured `/search` request
    fn build_request(&self, query: &PlaceQuery) -> Result<ProviderRequest, GeocodingError> {
        let mut request =
            ProviderRequest::new(self.config.endpoint("search"), &self.config.user_agent)?
                .param("city", query.locality.trim());

        if let Some(region) = query.region() {
            request = request.param("state", region);
        }

        request = request
            .param("country", query.country.trim())
            .param("format", "jsonv2")
            .param("limit", "1");

        if !self.config.accept_language.is_empty() {
            request = request.param("accept-language", &self.config.accept_language);
        }

        Ok(request)
    }

    /// Turn a `/search` payload into a result or a classified error
    fn interpret(query: &PlaceQuery, payload: Value) -> Result<GeocodeResult, GeocodingError> {
        let Value::Array(matches) = payload else {
            return Err(GeocodingError::ProviderProtocolError(
                "search response is not an array".to_string(),
            ));
        };

        let Some(first) = matches.into_iter().next() else {
            return Err(GeocodingError::LocationNotFound(query.to_string()));
        };

        let place: SearchPlace = serde_json::from_value(first)
            .map_err(|e| GeocodingError::ProviderProtocolError(e.to_string()))?;

        let latitude = place.lat.parse("latitude")?;
        let longitude = place.lon.parse("longitude")?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeocodingError::ProviderProtocolError(format!(
                "coordinate out of range: ({latitude}, {longitude})"
            )));
        }

        let display_address = place.display_name.trim();
        if display_address.is_empty() {
            return Err(GeocodingError::ProviderProtocolError(
                "empty display_name".to_string(),
            ));
        }

        Ok(GeocodeResult::new(latitude, longitude, display_address))
    }
}
