//! Geocoding integration for geolocate
//!
//! Resolves structured place queries to coordinates (forward geocoding) and
//! coordinates to addresses (reverse geocoding) using
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org) or any
//! provider exposing the same `/search` and `/reverse` semantics.
//!
//! # Architecture
//!
//! [`Transport`] performs one HTTP exchange and classifies transport-level
//! failures; [`HttpTransport`] implements it with `reqwest`. [`ForwardResolver`]
//! and [`ReverseResolver`] each build a provider request, send it through a
//! shared transport, and classify the payload into a result, a "not found"
//! outcome, or a protocol error. [`NominatimGeocodingClient`] bundles both
//! behind the [`GeocodingClient`] trait.
//!
//! Nothing in this crate retries; see `infrastructure::retry` for a
//! caller-side policy.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{Coordinate, PlaceQuery, ZoomLevel};
//! use integration_geocoding::{GeocodingClient, GeocodingConfig, NominatimGeocodingClient};
//!
//! let client = NominatimGeocodingClient::new(&GeocodingConfig::default())?;
//!
//! let place = client.geocode(&PlaceQuery::new("Scottsbluff", "NE", "US")).await?;
//! let address = client
//!     .reverse_geocode(Coordinate::new(41.8666, -103.6672), ZoomLevel::CITY)
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod forward;
mod models;
mod reverse;
mod transport;

pub use client::{GeocodingClient, NominatimGeocodingClient};
pub use config::GeocodingConfig;
pub use error::GeocodingError;
pub use forward::ForwardResolver;
pub use reverse::ReverseResolver;
pub use transport::{HttpTransport, ProviderRequest, Transport};
