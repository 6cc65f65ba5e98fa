//! World Mercator (EPSG:3395) projection on the WGS84 ellipsoid.
//!
//! Distances between projected points are planar approximations: good for
//! comparing candidates around one query point, not for geodesy.

use std::f64::consts::FRAC_PI_4;

use geo::Coord;

use crate::domain::Coordinate;

/// WGS84 semi-major axis in meters.
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 first eccentricity.
const ECCENTRICITY: f64 = 0.081_819_190_842_621_5;

/// Latitudes are clamped to this magnitude; Mercator diverges at the poles.
pub const MAX_LATITUDE: f64 = 85.0;

/// Meters per statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Project a geographic coordinate into EPSG:3395 meters (x east, y north).
pub fn project(c: Coordinate) -> Coord<f64> {
    let lambda = c.lon().to_radians();
    let phi = c.lat().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let e_sin = ECCENTRICITY * phi.sin();
    let conformal = ((1.0 - e_sin) / (1.0 + e_sin)).powf(ECCENTRICITY / 2.0);

    Coord {
        x: SEMI_MAJOR_AXIS * lambda,
        y: SEMI_MAJOR_AXIS * ((FRAC_PI_4 + phi / 2.0).tan() * conformal).ln(),
    }
}

/// Inverse of [`project`], by fixed-point iteration on latitude.
///
/// Returns `None` if the point falls outside the valid coordinate range.
pub fn unproject(p: Coord<f64>) -> Option<Coordinate> {
    let lon = (p.x / SEMI_MAJOR_AXIS).to_degrees();
    let t = (-p.y / SEMI_MAJOR_AXIS).exp();

    let mut phi = std::f64::consts::FRAC_PI_2 - 2.0 * t.atan();
    for _ in 0..15 {
        let e_sin = ECCENTRICITY * phi.sin();
        let next = std::f64::consts::FRAC_PI_2
            - 2.0 * (t * ((1.0 - e_sin) / (1.0 + e_sin)).powf(ECCENTRICITY / 2.0)).atan();
        let done = (next - phi).abs() < 1e-12;
        phi = next;
        if done {
            break;
        }
    }

    Coordinate::new(phi.to_degrees(), lon).ok()
}

/// Squared planar distance between two projected points.
pub fn distance_squared(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}

/// Planar distance between two coordinates, in meters.
pub fn planar_distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    distance_squared(project(a), project(b)).sqrt()
}

/// Planar distance between two coordinates, in miles.
pub fn planar_distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    planar_distance_meters(a, b) / METERS_PER_MILE
}
