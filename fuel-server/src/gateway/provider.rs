//! Routing provider abstraction.

use std::future::Future;

use geo::Rect;

use crate::domain::{Coordinate, Poi, Route};
use crate::ors::{OrsClient, OrsError};

/// Source of driving routes and points of interest.
///
/// This abstraction allows the gateway to be tested with mock data.
pub trait RoutingProvider: Send + Sync + 'static {
    /// Driving route between two points.
    fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> impl Future<Output = Result<Route, OrsError>> + Send;

    /// Points of interest inside `bbox` (x = longitude, y = latitude),
    /// widened by `buffer_meters`.
    fn pois(
        &self,
        bbox: Rect<f64>,
        buffer_meters: u32,
    ) -> impl Future<Output = Result<Vec<Poi>, OrsError>> + Send;
}

impl RoutingProvider for OrsClient {
    async fn directions(&self, start: Coordinate, end: Coordinate) -> Result<Route, OrsError> {
        OrsClient::directions(self, start, end).await
    }

    async fn pois(&self, bbox: Rect<f64>, buffer_meters: u32) -> Result<Vec<Poi>, OrsError> {
        OrsClient::pois(self, bbox, buffer_meters).await
    }
}
