//! Fuel station catalog.
//!
//! Stations come from a fixed-column price CSV. Addresses are geocoded
//! once at import and the result is kept as a JSON snapshot beside the
//! CSV, so later starts skip the geocoding pass.

mod error;
mod import;
mod snapshot;
mod store;

pub use error::CatalogError;
pub use import::{PriceRow, parse_price_rows, read_price_rows};
pub use snapshot::StationSnapshot;
pub use store::StationCatalog;
