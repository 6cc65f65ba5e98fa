//! Route geometry returned by the routing provider.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Miles per meter, as used for provider distances.
pub const MILES_PER_METER: f64 = 0.000621371;

/// Immutable, cheaply clonable sequence of route waypoints.
///
/// Hashable so it can key the POI cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteGeometry(Arc<[Coordinate]>);

impl RouteGeometry {
    /// An empty geometry (the degraded result of a failed route fetch).
    pub fn empty() -> Self {
        Self::default()
    }

    /// First and last waypoints, if the geometry has any.
    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        Some((*self.0.first()?, *self.0.last()?))
    }
}

impl From<Vec<Coordinate>> for RouteGeometry {
    fn from(points: Vec<Coordinate>) -> Self {
        Self(points.into())
    }
}

impl<const N: usize> From<[Coordinate; N]> for RouteGeometry {
    fn from(points: [Coordinate; N]) -> Self {
        Self(Arc::new(points))
    }
}

impl Deref for RouteGeometry {
    type Target = [Coordinate];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A driving route: geometry plus the provider's total distance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    pub geometry: RouteGeometry,
    pub miles: f64,
}

impl Route {
    /// Build a route from provider geometry and distance in meters.
    pub fn from_meters(geometry: RouteGeometry, meters: f64) -> Self {
        Self {
            geometry,
            miles: meters * MILES_PER_METER,
        }
    }

    /// The empty route used when the provider is unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the route has no geometry.
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }
}
