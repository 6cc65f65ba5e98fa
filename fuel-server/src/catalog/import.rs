//! Fuel price CSV parsing.
//!
//! The feed has a fixed header:
//! `OPIS Truckstop ID,Truckstop Name,Address,City,State,Rack ID,Retail Price`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::error::CatalogError;

/// One row of the price feed, before geocoding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceRow {
    #[serde(rename = "OPIS Truckstop ID")]
    pub opis_id: Option<i64>,

    #[serde(rename = "Truckstop Name")]
    pub name: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "State")]
    pub state: String,

    #[serde(rename = "Rack ID")]
    pub rack_id: Option<String>,

    #[serde(rename = "Retail Price")]
    pub price: f64,
}

impl PriceRow {
    /// Free-text address sent to the geocoder.
    pub fn geocode_query(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.state)
    }
}

/// Read every parseable row from the CSV at `path`.
///
/// A missing file is an error. Rows that fail to parse are logged and
/// skipped.
pub fn read_price_rows(path: &Path) -> Result<Vec<PriceRow>, CatalogError> {
    let file = File::open(path)?;
    parse_price_rows(file)
}

/// Parse price rows from any reader.
pub fn parse_price_rows<R: Read>(reader: R) -> Result<Vec<PriceRow>, CatalogError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Fail fast on an unreadable header rather than skipping every row.
    csv.headers()?;

    let mut rows = Vec::new();
    for (i, record) in csv.deserialize::<PriceRow>().enumerate() {
        match record {
            Ok(row) if row.price.is_finite() && row.price >= 0.0 => rows.push(row),
            Ok(row) => warn!(line = i + 2, price = row.price, "skipping row with invalid price"),
            Err(e) => warn!(line = i + 2, error = %e, "skipping unparseable row"),
        }
    }

    Ok(rows)
}
