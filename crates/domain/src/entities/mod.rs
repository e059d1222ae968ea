//! Entities - results handed back to callers of the geocoding client

mod geocode_result;

pub use geocode_result::{GeocodeResult, ReverseResult};
