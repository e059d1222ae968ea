//! Reverse geocoding: coordinate to address

use std::fmt;
use std::sync::Arc;

use domain::{Coordinate, ReverseResult, ZoomLevel};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::models::ReversePlace;
use crate::transport::{ProviderRequest, Transport};

/// Resolves a [`Coordinate`] to the single best-matching address
pub struct ReverseResolver {
    transport: Arc<dyn Transport>,
    config: GeocodingConfig,
}

impl fmt::Debug for ReverseResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReverseResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReverseResolver {
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

    /// Resolve a coordinate to an address at the given precision
    ///
    /// Out-of-range coordinates are rejected before any request is sent.
    #[instrument(skip_all, fields(coordinate = %coordinate, zoom = %zoom))]
    pub async fn resolve(
        &self,
        coordinate: Coordinate,
        zoom: ZoomLevel,
    ) -> Result<ReverseResult, GeocodingError> {
        coordinate.validate()?;

        let request = self.build_request(coordinate, zoom)?;
        debug!("Reverse geocoding");

        let payload = self.transport.send(request).await?;
        let result = Self::interpret(coordinate, payload);

        if let Err(GeocodingError::ProviderProtocolError(reason)) = &result {
            warn!(%reason, "Unexpected reverse response from geocoding provider");
        }

        result
    }

    /// Resolve at the configured default zoom (town/city level unless changed)
    pub async fn resolve_default(
        &self,
        coordinate: Coordinate,
    ) -> Result<ReverseResult, GeocodingError> {
        self.resolve(coordinate, self.config.default_zoom).await
    }

    /// Build the `/reverse` request
    fn build_request(
        &self,
        coordinate: Coordinate,
        zoom: ZoomLevel,
    ) -> Result<ProviderRequest, GeocodingError> {
        let mut request =
            ProviderRequest::new(self.config.endpoint("reverse"), &self.config.user_agent)?
                .param("lat", coordinate.latitude.to_string())
                .param("lon", coordinate.longitude.to_string())
                .param("zoom", zoom.value().to_string())
                .param("format", "jsonv2");

        if !self.config.accept_language.is_empty() {
            request = request.param("accept-language", &self.config.accept_language);
        }

        Ok(request)
    }

    /// Turn a `/reverse` payload into a result or a classified error
    fn interpret(coordinate: Coordinate, payload: Value) -> Result<ReverseResult, GeocodingError> {
        if !payload.is_object() {
            return Err(GeocodingError::ProviderProtocolError(
                "reverse response is not an object".to_string(),
            ));
        }

        let place: ReversePlace = serde_json::from_value(payload)
            .map_err(|e| GeocodingError::ProviderProtocolError(e.to_string()))?;

        if let Some(reason) = place.error {
            debug!(%reason, "Provider has no address for coordinate");
            return Err(GeocodingError::AddressNotFound {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            });
        }

        match place.display_name.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Ok(ReverseResult::new(address)),
            _ => Err(GeocodingError::ProviderProtocolError(
                "missing display_name".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    fn resolver_with(mock: MockTransport) -> ReverseResolver {
        ReverseResolver::new(Arc::new(mock), GeocodingConfig::for_testing()).unwrap()
    }

    #[tokio::test]
    async fn test_scottsbluff_reverse_at_city_zoom() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .withf(|request| {
                request.url().ends_with("/reverse")
                    && request.query_value("lat") == Some("41.8666")
                    && request.query_value("lon") == Some("-103.6672")
                    && request.query_value("zoom") == Some("10")
            })
            .returning(|_| {
                Ok(json!({
                    "lat": "41.8666",
                    "lon": "-103.6672",
                    "display_name": "Scottsbluff, Nebraska, United States"
                }))
            });

        let resolver = resolver_with(mock);
        let result = resolver
            .resolve(Coordinate::new(41.8666, -103.6672), ZoomLevel::CITY)
            .await
            .unwrap();

        assert_eq!(
            result,
            ReverseResult::new("Scottsbluff, Nebraska, United States")
        );
    }

    #[tokio::test]
    async fn test_open_ocean_is_address_not_found() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Ok(json!({"error": "Unable to geocode"})));

        let resolver = resolver_with(mock);
        let err = resolver
            .resolve(Coordinate::new(0.0, -170.0), ZoomLevel::CITY)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(
            err,
            GeocodingError::AddressNotFound { longitude, .. } if (longitude - -170.0).abs() < f64::EPSILON
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_never_reaches_transport() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();

        let resolver = resolver_with(mock);
        for coordinate in [
            Coordinate::new(90.5, 0.0),
            Coordinate::new(-91.0, 0.0),
            Coordinate::new(0.0, 180.01),
            Coordinate::new(f64::NAN, 0.0),
        ] {
            let err = resolver
                .resolve(coordinate, ZoomLevel::CITY)
                .await
                .unwrap_err();
            assert!(matches!(err, GeocodingError::InvalidCoordinate { .. }));
        }
    }

    #[tokio::test]
    async fn test_resolve_default_uses_configured_zoom() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .withf(|request| request.query_value("zoom") == Some("14"))
            .returning(|_| Ok(json!({"display_name": "Downtown, Scottsbluff"})));

        let config = GeocodingConfig {
            default_zoom: ZoomLevel::SUBURB,
            ..GeocodingConfig::for_testing()
        };
        let resolver = ReverseResolver::new(Arc::new(mock), config).unwrap();

        let result = resolver
            .resolve_default(Coordinate::new(41.8666, -103.6672))
            .await
            .unwrap();
        assert_eq!(result.display_address(), "Downtown, Scottsbluff");
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(2)
            .returning(|_| Ok(json!({"display_name": "Scottsbluff, Nebraska, United States"})));

        let resolver = resolver_with(mock);
        let coordinate = Coordinate::new(41.8666, -103.6672);
        let first = resolver.resolve(coordinate, ZoomLevel::CITY).await;
        let second = resolver.resolve(coordinate, ZoomLevel::CITY).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_timeout_passes_through() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(GeocodingError::NetworkTimeout { timeout_secs: 5 }));

        let resolver = resolver_with(mock);
        let err = resolver
            .resolve(Coordinate::new(41.8666, -103.6672), ZoomLevel::CITY)
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }

    #[test]
    fn test_interpret_missing_display_name() {
        let err = ReverseResolver::interpret(Coordinate::new(1.0, 2.0), json!({"place_id": 1}))
            .unwrap_err();
        assert!(matches!(err, GeocodingError::ProviderProtocolError(_)));
    }

    #[test]
    fn test_interpret_array_payload() {
        let err = ReverseResolver::interpret(
            Coordinate::new(1.0, 2.0),
            json!([{"display_name": "Somewhere"}]),
        )
        .unwrap_err();
        assert!(matches!(err, GeocodingError::ProviderProtocolError(_)));
    }

    #[test]
    fn test_interpret_structured_error_member() {
        let err = ReverseResolver::interpret(
            Coordinate::new(1.0, 2.0),
            json!({"error": {"code": 404, "message": "No result"}}),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    mod out_of_range {
        use super::*;
        use proptest::prelude::*;

        fn out_of_range_coordinate() -> impl Strategy<Value = Coordinate> {
            prop_oneof![
                (90.000_001f64..1.0e6, -180.0f64..=180.0),
                (-1.0e6..-90.000_001f64, -180.0f64..=180.0),
                (-90.0f64..=90.0, 180.000_001f64..1.0e6),
                (-90.0f64..=90.0, -1.0e6..-180.000_001f64),
            ]
            .prop_map(|(latitude, longitude)| Coordinate::new(latitude, longitude))
        }

        proptest! {
            #[test]
            fn rejected_before_any_request(coordinate in out_of_range_coordinate()) {
                let mut mock = MockTransport::new();
                mock.expect_send().never();
                let resolver = resolver_with(mock);

                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();
                let result = runtime.block_on(resolver.resolve(coordinate, ZoomLevel::CITY));

                let is_invalid_coordinate =
                    matches!(result, Err(GeocodingError::InvalidCoordinate { .. }));
                prop_assert!(is_invalid_coordinate);
            }
        }
    }
}
