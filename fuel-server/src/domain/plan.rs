//! Planning output types.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Poi};

/// Round to two decimal places (cents, or hundredths of a mile).
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A refueling stop chosen at a threshold crossing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Station display name at selection time.
    pub station: String,

    pub city: String,

    pub price_per_gallon: f64,

    /// Gallons bought to refill a full range.
    pub gallons: f64,

    /// `gallons * price_per_gallon`, rounded to cents.
    pub cost: f64,

    /// Cumulative route mileage at which the stop was triggered.
    pub at_mile: f64,
}

/// Ordered stops and their aggregate cost.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StopPlan {
    pub stops: Vec<Stop>,
    pub total_cost: f64,
}

impl StopPlan {
    /// Build a plan, totalling stop costs to the cent.
    pub fn new(stops: Vec<Stop>) -> Self {
        let total_cost = round_cents(stops.iter().map(|s| s.cost).sum());
        Self { stops, total_cost }
    }
}

/// Complete answer to one planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub distance_miles: f64,
    pub fuel_stops: Vec<Stop>,
    pub total_fuel_cost: f64,
    pub start_address: Coordinate,
    pub end_address: Coordinate,
    pub pois: Vec<Poi>,
}

impl PlanResult {
    /// Assemble a result from a stop plan and the route context.
    pub fn new(
        miles: f64,
        plan: StopPlan,
        start: Coordinate,
        end: Coordinate,
        pois: Vec<Poi>,
    ) -> Self {
        Self {
            distance_miles: round_cents(miles),
            fuel_stops: plan.stops,
            total_fuel_cost: plan.total_cost,
            start_address: start,
            end_address: end,
            pois,
        }
    }
}
