//! OpenRouteService client.
//!
//! HTTP access to the three upstream endpoints the planner needs:
//! driving directions, points of interest along a bounding box, and
//! forward geocoding. Responses are GeoJSON with `[lon, lat]` positions;
//! conversion to domain types swaps them into [`Coordinate`](crate::domain::Coordinate)s.

mod client;
mod convert;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, OrsClient, OrsConfig};
pub use convert::{convert_directions, convert_geocode, convert_pois};
pub use error::OrsError;
pub use types::{DirectionsResponse, GeocodeResponse, PoisResponse};
