//! Points of interest returned by the routing provider.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A point of interest near a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// OSM name, or `"Unknown"` when the provider has none.
    pub name: String,

    #[serde(flatten, with = "lat_lon_fields")]
    pub location: Coordinate,

    /// Provider category names (e.g. `"fuel"`, `"bench"`).
    pub categories: Vec<String>,

    pub website: String,

    pub opening_hours: String,
}

impl Poi {
    /// Whether the POI belongs to the named category.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Keep only POIs in `category`; `None` keeps everything.
pub fn filter_by_category(pois: Vec<Poi>, category: Option<&str>) -> Vec<Poi> {
    match category {
        Some(category) => pois.into_iter().filter(|p| p.has_category(category)).collect(),
        None => pois,
    }
}

/// (De)serializes a coordinate as separate `latitude` / `longitude` fields.
mod lat_lon_fields {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::domain::Coordinate;

    #[derive(Serialize, Deserialize)]
    struct LatLon {
        latitude: f64,
        longitude: f64,
    }

    pub fn serialize<S: Serializer>(c: &Coordinate, serializer: S) -> Result<S::Ok, S::Error> {
        LatLon {
            latitude: c.lat(),
            longitude: c.lon(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Coordinate, D::Error> {
        let raw = LatLon::deserialize(deserializer)?;
        Coordinate::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}
