//! Wire types for OpenRouteService GeoJSON responses.
//!
//! Only the fields the planner reads are modelled; everything else is
//! ignored by serde.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `GET /v2/directions/{profile}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeature {
    pub geometry: LineGeometry,
    pub properties: RouteProperties,
}

/// GeoJSON `LineString`; positions are `[lon, lat]`.
#[derive(Debug, Clone, Deserialize)]
pub struct LineGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteProperties {
    pub summary: RouteSummary,
}

/// ORS omits `distance` for zero-length routes.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSummary {
    #[serde(default)]
    pub distance: f64,
}

/// `POST /pois` request body.
#[derive(Debug, Clone, Serialize)]
pub struct PoisRequest {
    pub request: &'static str,
    pub geometry: PoisGeometry,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoisGeometry {
    /// `[[min_lon, min_lat], [max_lon, max_lat]]`
    pub bbox: [[f64; 2]; 2],
    pub geojson: PointGeometry,
    pub buffer: u32,
}

/// GeoJSON `Point`; position is `[lon, lat]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

fn point_type() -> String {
    "Point".to_string()
}

/// `POST /pois` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PoisResponse {
    #[serde(default)]
    pub features: Vec<PoiFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoiFeature {
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: PoiProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiProperties {
    #[serde(default)]
    pub osm_tags: OsmTags,

    /// Keyed by ORS category id.
    #[serde(default)]
    pub category_ids: BTreeMap<String, CategoryInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsmTags {
    pub name: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInfo {
    pub category_name: String,
}

/// `GET /geocode/search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeFeature {
    pub geometry: PointGeometry,
}
