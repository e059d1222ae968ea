//! Command execution and output rendering

use std::future::Future;

use domain::{Coordinate, GeocodeResult, PlaceQuery, ReverseResult, ZoomLevel};
use infrastructure::RetryConfig;
use integration_geocoding::{GeocodingClient, GeocodingError};
use serde_json::json;
use tracing::debug;

/// Exit status used when a lookup had no match
pub const EXIT_NOT_FOUND: u8 = 2;

/// A lookup requested on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Place query to coordinates
    Forward(PlaceQuery),
    /// Coordinate to address
    Reverse {
        /// Point to look up
        coordinate: Coordinate,
        /// Requested precision
        zoom: ZoomLevel,
    },
    /// Provider status check
    Health,
}

/// Successful result of a [`Request`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Forward lookup match
    Place(GeocodeResult),
    /// Reverse lookup match
    Address {
        /// Point that was looked up
        coordinate: Coordinate,
        /// Precision used
        zoom: ZoomLevel,
        /// Provider address
        result: ReverseResult,
    },
    /// Provider status
    Health(bool),
}

impl Outcome {
    /// Whether the command should exit successfully
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Health(false))
    }
}

/// Run a request against the client, optionally retrying transient failures
pub async fn execute(
    client: &dyn GeocodingClient,
    request: &Request,
    retry: Option<&RetryConfig>,
) -> Result<Outcome, GeocodingError> {
    debug!(?request, retry = retry.is_some(), "Executing request");

    match request {
        Request::Forward(query) => call(retry, || client.geocode(query))
            .await
            .map(Outcome::Place),
        Request::Reverse { coordinate, zoom } => {
            call(retry, || client.reverse_geocode(*coordinate, *zoom))
                .await
                .map(|result| Outcome::Address {
                    coordinate: *coordinate,
                    zoom: *zoom,
                    result,
                })
        },
        Request::Health => Ok(Outcome::Health(client.is_healthy().await)),
    }
}

async fn call<T, F, Fut>(retry: Option<&RetryConfig>, mut operation: F) -> Result<T, GeocodingError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeocodingError>>,
{
    match retry {
        Some(config) => infrastructure::retry(config, operation).await,
        None => operation().await,
    }
}

/// Render a successful outcome for stdout
pub fn render(outcome: &Outcome, as_json: bool) -> String {
    if as_json {
        let value = match outcome {
            Outcome::Place(place) => json!({
                "latitude": place.latitude(),
                "longitude": place.longitude(),
                "address": place.display_address(),
            }),
            Outcome::Address {
                coordinate,
                zoom,
                result,
            } => json!({
                "latitude": coordinate.latitude,
                "longitude": coordinate.longitude,
                "zoom": zoom.value(),
                "address": result.display_address(),
            }),
            Outcome::Health(healthy) => json!({ "healthy": healthy }),
        };
        return value.to_string();
    }

    match outcome {
        Outcome::Place(place) => format!(
            "Latitude:  {}\nLongitude: {}\nAddress:   {}",
            place.latitude(),
            place.longitude(),
            place.display_address()
        ),
        Outcome::Address { result, .. } => result.display_address().to_string(),
        Outcome::Health(true) => "Geocoding provider is healthy".to_string(),
        Outcome::Health(false) => "Geocoding provider is unavailable".to_string(),
    }
}

/// Render a "no results" outcome for stdout
pub fn render_not_found(err: &GeocodingError, as_json: bool) -> String {
    if as_json {
        json!({ "error": "not_found", "message": err.to_string() }).to_string()
    } else {
        format!("No results: {err}")
    }
}
