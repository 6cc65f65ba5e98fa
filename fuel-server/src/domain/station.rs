//! Fuel stations and the capability the planner consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coordinate, Poi};

/// Price assumed for a POI that carries no price information (dollars/gallon).
pub const ASSUMED_POI_PRICE: f64 = 4.5;

/// Opaque catalog identity of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Anything the planner can refuel at: it has a price and, maybe, a location.
///
/// Candidates without a location never match a spatial query.
pub trait FuelSource {
    /// Display name recorded on a stop.
    fn name(&self) -> &str;

    /// City recorded on a stop.
    fn city(&self) -> &str;

    /// Price per gallon in dollars.
    fn price_per_gallon(&self) -> f64;

    /// Geographic location, if known.
    fn location(&self) -> Option<Coordinate>;
}

impl<T: FuelSource + ?Sized> FuelSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn city(&self) -> &str {
        (**self).city()
    }

    fn price_per_gallon(&self) -> f64 {
        (**self).price_per_gallon()
    }

    fn location(&self) -> Option<Coordinate> {
        (**self).location()
    }
}

impl<T: FuelSource + ?Sized> FuelSource for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn city(&self) -> &str {
        (**self).city()
    }

    fn price_per_gallon(&self) -> f64 {
        (**self).price_per_gallon()
    }

    fn location(&self) -> Option<Coordinate> {
        (**self).location()
    }
}

/// A fuel station from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,

    /// OPIS truckstop identifier from the price feed.
    pub opis_id: Option<i64>,

    pub name: String,

    /// Full street address as geocoded ("street, city, state").
    pub address: String,

    pub city: String,

    pub state: String,

    pub rack_id: Option<String>,

    /// Retail price per gallon.
    pub price: f64,

    pub location: Option<Coordinate>,
}

impl FuelSource for Station {
    fn name(&self) -> &str {
        &self.name
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn price_per_gallon(&self) -> f64 {
        self.price
    }

    fn location(&self) -> Option<Coordinate> {
        self.location
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}, {}", self.name, self.city, self.state)
    }
}

/// A point of interest treated as a refueling candidate.
///
/// POIs carry no price, so every one is priced at [`ASSUMED_POI_PRICE`]
/// unless told otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiStation {
    poi: Poi,
    price: f64,
}

impl PoiStation {
    /// Wrap a POI at the assumed price.
    pub fn new(poi: Poi) -> Self {
        Self::with_price(poi, ASSUMED_POI_PRICE)
    }

    /// Wrap a POI at an explicit price.
    pub fn with_price(poi: Poi, price: f64) -> Self {
        Self { poi, price }
    }

    /// The wrapped POI.
    pub fn poi(&self) -> &Poi {
        &self.poi
    }
}

impl FuelSource for PoiStation {
    fn name(&self) -> &str {
        &self.poi.name
    }

    fn city(&self) -> &str {
        ""
    }

    fn price_per_gallon(&self) -> f64 {
        self.price
    }

    fn location(&self) -> Option<Coordinate> {
        Some(self.poi.location)
    }
}
