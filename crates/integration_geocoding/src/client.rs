//! Geocoding client facade
//!
//! Bundles the forward and reverse resolvers behind one shared transport so
//! callers can depend on a single [`GeocodingClient`] trait object.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{Coordinate, GeocodeResult, PlaceQuery, ReverseResult, ZoomLevel};
use tracing::{debug, warn};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::forward::ForwardResolver;
use crate::models::ProviderStatus;
use crate::reverse::ReverseResolver;
use crate::transport::{HttpTransport, ProviderRequest, Transport};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a structured place query to coordinates and an address
    async fn geocode(&self, query: &PlaceQuery) -> Result<GeocodeResult, GeocodingError>;

    /// Convert a coordinate to an address at the given precision
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
        zoom: ZoomLevel,
    ) -> Result<ReverseResult, GeocodingError>;

    /// Check if the geocoding provider is reachable and reports itself healthy
    async fn is_healthy(&self) -> bool;
}

/// Nominatim-backed geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    forward: ForwardResolver,
    reverse: ReverseResolver,
    health: HealthProbe,
}

impl NominatimGeocodingClient {
    /// Create a client talking HTTP to the configured provider
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        config.validate().map_err(GeocodingError::Configuration)?;
        let transport = HttpTransport::from_config(config)?;
        Self::with_transport(Arc::new(transport), config)
    }

    /// Create a client on top of an arbitrary transport
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the configuration is invalid.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        config: &GeocodingConfig,
    ) -> Result<Self, GeocodingError> {
        Ok(Self {
            forward: ForwardResolver::new(Arc::clone(&transport), config.clone())?,
            reverse: ReverseResolver::new(Arc::clone(&transport), config.clone())?,
            health: HealthProbe {
                transport,
                url: config.endpoint("status"),
                user_agent: config.user_agent.clone(),
            },
        })
    }

    /// Forward resolver used by this client
    #[must_use]
    pub const fn forward(&self) -> &ForwardResolver {
        &self.forward
    }

    /// Reverse resolver used by this client
    #[must_use]
    pub const fn reverse(&self) -> &ReverseResolver {
        &self.reverse
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    async fn geocode(&self, query: &PlaceQuery) -> Result<GeocodeResult, GeocodingError> {
        self.forward.resolve(query).await
    }

    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
        zoom: ZoomLevel,
    ) -> Result<ReverseResult, GeocodingError> {
        self.reverse.resolve(coordinate, zoom).await
    }

    async fn is_healthy(&self) -> bool {
        self.health.check().await
    }
}

/// Queries the provider's `/status` endpoint
struct HealthProbe {
    transport: Arc<dyn Transport>,
    url: String,
    user_agent: String,
}

impl std::fmt::Debug for HealthProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthProbe")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HealthProbe {
    async fn check(&self) -> bool {
        let request = match ProviderRequest::new(&self.url, &self.user_agent) {
            Ok(request) => request.param("format", "json"),
            Err(e) => {
                warn!(error = %e, "Cannot build health check request");
                return false;
            },
        };

        match self.transport.send(request).await {
            Ok(payload) => match serde_json::from_value::<ProviderStatus>(payload) {
                Ok(status) => {
                    debug!(status = status.status, message = ?status.message, "Provider status");
                    status.status == 0
                },
                Err(e) => {
                    warn!(error = %e, "Unexpected status response from geocoding provider");
                    false
                },
            },
            Err(e) => {
                debug!(error = %e, "Geocoding provider health check failed");
                false
            },
        }
    }
}
