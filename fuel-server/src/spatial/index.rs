//! Radius queries over fuel candidates in the projected frame.
//!
//! Both entry points share one contract: candidates without a location are
//! skipped, a candidate qualifies when its planar distance to the query
//! point is **at most** the radius (the boundary is inclusive), and results
//! come back in input order.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::domain::{Coordinate, FuelSource};

use super::projection::{METERS_PER_MILE, distance_squared, project};

/// Inclusive radius test on a squared planar distance.
fn within(distance_2: f64, radius_meters: f64) -> bool {
    distance_2 <= radius_meters * radius_meters
}

/// Candidates within `radius_miles` of `point`, by linear scan.
pub fn stations_near<S: FuelSource>(
    point: Coordinate,
    stations: &[S],
    radius_miles: f64,
) -> Vec<&S> {
    if stations.is_empty() {
        return Vec::new();
    }

    let origin = project(point);
    let radius_meters = radius_miles * METERS_PER_MILE;

    stations
        .iter()
        .filter(|s| {
            s.location()
                .is_some_and(|loc| within(distance_squared(project(loc), origin), radius_meters))
        })
        .collect()
}

/// A projected candidate position tagged with its input index.
#[derive(Debug, Clone, Copy)]
struct IndexedStation {
    idx: usize,
    position: [f64; 2],
}

impl RTreeObject for IndexedStation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedStation {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree over projected candidate locations.
///
/// Built once per candidate snapshot; answers the same queries as
/// [`stations_near`] without scanning every candidate.
pub struct StationIndex<'a, S> {
    stations: &'a [S],
    tree: RTree<IndexedStation>,
}

impl<'a, S: FuelSource> StationIndex<'a, S> {
    /// Project and index every candidate that has a location.
    pub fn build(stations: &'a [S]) -> Self {
        let indexed: Vec<IndexedStation> = stations
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| {
                let p = project(s.location()?);
                Some(IndexedStation {
                    idx,
                    position: [p.x, p.y],
                })
            })
            .collect();

        Self {
            stations,
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Number of indexed (located) candidates.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether no candidate has a location.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidates within `radius_miles` of `point`, in input order.
    pub fn near(&self, point: Coordinate, radius_miles: f64) -> Vec<&'a S> {
        let origin = project(point);
        let radius_meters = radius_miles * METERS_PER_MILE;

        let mut hits: Vec<usize> = self
            .tree
            .locate_within_distance([origin.x, origin.y], radius_meters * radius_meters)
            .map(|s| s.idx)
            .collect();
        hits.sort_unstable();

        hits.into_iter().map(|idx| &self.stations[idx]).collect()
    }
}
