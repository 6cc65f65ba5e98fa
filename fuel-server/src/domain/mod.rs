//! Domain types for the fuel route planner.
//!
//! Types validate their invariants at construction time, so code that
//! receives them can trust their validity.

mod coordinate;
mod plan;
mod poi;
mod route;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use plan::{PlanResult, Stop, StopPlan, round_cents};
pub use poi::{Poi, filter_by_category};
pub use route::{MILES_PER_METER, Route, RouteGeometry};
pub use station::{ASSUMED_POI_PRICE, FuelSource, PoiStation, Station, StationId};
