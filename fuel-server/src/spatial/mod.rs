//! Spatial proximity queries.
//!
//! Geographic degrees are not uniform in length, so radius comparisons are
//! made after projecting into a planar, meters-based frame (EPSG:3395).

mod index;
mod projection;

pub use index::{StationIndex, stations_near};
pub use projection::{
    MAX_LATITUDE, METERS_PER_MILE, distance_squared, planar_distance_meters,
    planar_distance_miles, project, unproject,
};
