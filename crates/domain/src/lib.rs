//! Domain layer for geolocate
//!
//! Contains the place queries, coordinates and geocoding results exchanged
//! between callers and the geocoding client, plus their validation errors.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
