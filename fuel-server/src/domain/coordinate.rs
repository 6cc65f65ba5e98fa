//! Geographic coordinate type.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lon}): {reason}")]
pub struct InvalidCoordinate {
    lat: f64,
    lon: f64,
    reason: &'static str,
}

/// A (latitude, longitude) pair in WGS84 degrees (EPSG:4326).
///
/// Both components are finite and within range by construction. Negative
/// zero is folded into positive zero so that equality and hashing agree,
/// which lets coordinates act as cache keys.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::Coordinate;
///
/// let denver = Coordinate::new(39.7392, -104.9903).unwrap();
/// assert_eq!(denver.lat(), 39.7392);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        let err = |reason| InvalidCoordinate { lat, lon, reason };

        if !lat.is_finite() || !lon.is_finite() {
            return Err(err("components must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(err("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(err("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            lat: lat + 0.0,
            lon: lon + 0.0,
        })
    }

    /// Create a coordinate from a GeoJSON-ordered `[lon, lat]` position.
    pub fn from_lon_lat(position: [f64; 2]) -> Result<Self, InvalidCoordinate> {
        Self::new(position[1], position[0])
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// The coordinate as a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Serialized as `[lat, lon]`.
impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lon].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [lat, lon] = <[f64; 2]>::deserialize(deserializer)?;
        Coordinate::new(lat, lon).map_err(serde::de::Error::custom)
    }
}
