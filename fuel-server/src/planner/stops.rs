//! Greedy threshold-crossing stop selection.
//!
//! Walks the route accumulating planar mileage. Each time the running
//! total reaches the next multiple of the vehicle's range, the cheapest
//! station near that waypoint is chosen and the threshold moves on by one
//! range. This is greedy: it never looks ahead for a cheaper station
//! further down the road.

use tracing::debug;

use crate::domain::{Coordinate, FuelSource, Stop, StopPlan, round_cents};
use crate::spatial::{StationIndex, planar_distance_miles};

use super::config::{GapPolicy, PlannerConfig};
use super::error::PlannerError;

/// Stop planner.
pub struct Planner<'a> {
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Choose refueling stops along `route` from `stations`.
    ///
    /// The threshold advances by one range at most once per waypoint, so a
    /// single segment longer than the range triggers only one stop.
    pub fn compute_stops<S: FuelSource>(
        &self,
        route: &[Coordinate],
        stations: &[S],
    ) -> Result<StopPlan, PlannerError> {
        if stations.is_empty() {
            return Err(PlannerError::NoStations);
        }

        let index = StationIndex::build(stations);
        let range = self.config.range_miles;

        let mut stops = Vec::new();
        let mut miles_so_far = 0.0;
        let mut next_threshold = range;

        for pair in route.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            miles_so_far += planar_distance_miles(from, to);

            if miles_so_far < next_threshold {
                continue;
            }

            match self.cheapest_near(&index, to) {
                Some(station) => stops.push(self.stop_at(station, miles_so_far)),
                None if self.config.gap_policy == GapPolicy::Fail => {
                    return Err(PlannerError::NoStationInRange {
                        mile: round_cents(miles_so_far),
                    });
                }
                None => {
                    debug!(mile = miles_so_far, point = %to, "no station in range, skipping threshold");
                }
            }

            next_threshold += range;
        }

        Ok(StopPlan::new(stops))
    }

    /// Cheapest station near `point`, widening the radius if the gap policy
    /// allows. Ties go to the first station in input order.
    fn cheapest_near<'s, S: FuelSource>(
        &self,
        index: &StationIndex<'s, S>,
        point: Coordinate,
    ) -> Option<&'s S> {
        self.config.search_radii().into_iter().find_map(|radius| {
            index
                .near(point, radius)
                .into_iter()
                .min_by(|a, b| a.price_per_gallon().total_cmp(&b.price_per_gallon()))
        })
    }

    fn stop_at<S: FuelSource>(&self, station: &S, miles: f64) -> Stop {
        let gallons = self.config.gallons_per_stop();
        let price = station.price_per_gallon();

        Stop {
            station: station.name().to_string(),
            city: station.city().to_string(),
            price_per_gallon: price,
            gallons,
            cost: round_cents(gallons * price),
            at_mile: round_cents(miles),
        }
    }
}

/// Choose refueling stops with the given configuration.
pub fn compute_stops<S: FuelSource>(
    route: &[Coordinate],
    stations: &[S],
    config: &PlannerConfig,
) -> Result<StopPlan, PlannerError> {
    Planner::new(config).compute_stops(route, stations)
}

#[cfg(test)]
#[path = "stops_tests.rs"]
mod tests;
