//! Conversion from ORS wire types to domain types.

use crate::domain::{Coordinate, Poi, Route, RouteGeometry};

use super::error::OrsError;
use super::types::{DirectionsResponse, GeocodeResponse, PoiFeature, PoisResponse};

/// Name given to POIs without an OSM name tag.
const UNKNOWN_NAME: &str = "Unknown";

/// Convert the first route of a directions response.
pub fn convert_directions(resp: DirectionsResponse) -> Result<Route, OrsError> {
    let feature = resp.features.into_iter().next().ok_or(OrsError::NoRoute)?;

    let points = feature
        .geometry
        .coordinates
        .into_iter()
        .map(Coordinate::from_lon_lat)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route::from_meters(
        RouteGeometry::from(points),
        feature.properties.summary.distance,
    ))
}

/// Convert every POI feature, in response order.
pub fn convert_pois(resp: PoisResponse) -> Result<Vec<Poi>, OrsError> {
    resp.features.into_iter().map(convert_poi).collect()
}

fn convert_poi(feature: PoiFeature) -> Result<Poi, OrsError> {
    let location = Coordinate::from_lon_lat(feature.geometry.coordinates)?;
    let tags = feature.properties.osm_tags;

    Ok(Poi {
        name: tags.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        location,
        categories: feature
            .properties
            .category_ids
            .into_values()
            .map(|c| c.category_name)
            .collect(),
        website: tags.website.unwrap_or_default(),
        opening_hours: tags.opening_hours.unwrap_or_default(),
    })
}

/// The best geocoding match, or `None` when nothing matched.
pub fn convert_geocode(resp: GeocodeResponse) -> Result<Option<Coordinate>, OrsError> {
    resp.features
        .into_iter()
        .next()
        .map(|f| Coordinate::from_lon_lat(f.geometry.coordinates))
        .transpose()
        .map_err(OrsError::from)
}
