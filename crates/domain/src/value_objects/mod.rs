//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod place_query;
mod zoom_level;

pub use coordinate::Coordinate;
pub use place_query::PlaceQuery;
pub use zoom_level::ZoomLevel;
