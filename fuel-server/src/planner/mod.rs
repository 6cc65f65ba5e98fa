//! Refueling stop planner.
//!
//! Given a route and a set of fuel candidates, decides where the vehicle
//! must stop and which station to use at each stop. Planning is a
//! synchronous CPU pass over data already fetched.

mod config;
mod error;
mod stops;

pub use config::{GapPolicy, MAX_RADIUS_STEPS, PlannerConfig};
pub use error::PlannerError;
pub use stops::{Planner, compute_stops};
