//! In-memory station catalog.

use std::path::Path;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::domain::{Station, StationId};
use crate::geocode::Geocoder;

use super::error::CatalogError;
use super::import::{PriceRow, read_price_rows};
use super::snapshot::StationSnapshot;

/// Default number of concurrent geocode calls during import.
const DEFAULT_GEOCODE_CONCURRENCY: usize = 4;

/// Shared, read-mostly set of fuel stations.
///
/// Written only by [`load_if_empty`](Self::load_if_empty); every other
/// access is a read of an immutable snapshot.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Arc<RwLock<Vec<Arc<Station>>>>,
    load_lock: Arc<Mutex<()>>,
    geocode_concurrency: usize,
}

impl StationCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::from_stations(Vec::new())
    }

    /// Create a catalog holding `stations`.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self {
            stations: Arc::new(RwLock::new(stations.into_iter().map(Arc::new).collect())),
            load_lock: Arc::new(Mutex::new(())),
            geocode_concurrency: DEFAULT_GEOCODE_CONCURRENCY,
        }
    }

    /// Set how many geocode calls may run at once during import.
    pub fn with_geocode_concurrency(mut self, n: usize) -> Self {
        self.geocode_concurrency = n.max(1);
        self
    }

    /// All stations, in catalog order.
    pub async fn list_all(&self) -> Vec<Arc<Station>> {
        self.stations.read().await.clone()
    }

    /// Number of stations.
    pub async fn len(&self) -> usize {
        self.stations.read().await.len()
    }

    /// Whether the catalog holds no stations.
    pub async fn is_empty(&self) -> bool {
        self.stations.read().await.is_empty()
    }

    /// Populate the catalog once.
    ///
    /// Does nothing if stations are already loaded. Otherwise prefers the
    /// JSON snapshot beside `csv_path`, falling back to parsing the CSV and
    /// geocoding every row. Returns the number of stations held afterwards.
    pub async fn load_if_empty<G: Geocoder>(
        &self,
        csv_path: &Path,
        geocoder: &G,
    ) -> Result<usize, CatalogError> {
        let _guard = self.load_lock.lock().await;

        let existing = self.len().await;
        if existing > 0 {
            return Ok(existing);
        }

        let snapshot = StationSnapshot::beside(csv_path);
        if let Some(stations) = snapshot.load() {
            info!(count = stations.len(), path = %snapshot.path().display(), "loaded stations from snapshot");
            return Ok(self.replace(stations).await);
        }

        let rows = read_price_rows(csv_path)?;
        info!(count = rows.len(), path = %csv_path.display(), "geocoding stations");

        let stations = self.geocode_rows(rows, geocoder).await;
        let located = stations.iter().filter(|s| s.location.is_some()).count();
        info!(count = stations.len(), located, "station import complete");

        if let Err(e) = snapshot.save(&stations) {
            warn!(error = %e, "could not write station snapshot");
        }

        Ok(self.replace(stations).await)
    }

    /// Geocode rows with bounded concurrency, keeping row order and
    /// assigning sequential ids.
    async fn geocode_rows<G: Geocoder>(&self, rows: Vec<PriceRow>, geocoder: &G) -> Vec<Station> {
        stream::iter(rows.into_iter().enumerate())
            .map(|(i, row)| async move {
                let address = row.geocode_query();
                let location = match geocoder.geocode(&address).await {
                    Ok(location) => location,
                    Err(e) => {
                        warn!(%address, error = %e, "station geocode failed");
                        None
                    }
                };
                if location.is_none() {
                    warn!(%address, "station has no coordinates");
                }

                Station {
                    id: StationId(i as u64),
                    opis_id: row.opis_id,
                    name: row.name,
                    address,
                    city: row.city,
                    state: row.state,
                    rack_id: row.rack_id,
                    price: row.price,
                    location,
                }
            })
            .buffered(self.geocode_concurrency)
            .collect()
            .await
    }

    async fn replace(&self, stations: Vec<Station>) -> usize {
        let mut guard = self.stations.write().await;
        *guard = stations.into_iter().map(Arc::new).collect();
        guard.len()
    }
}

impl Default for StationCatalog {
    fn default() -> Self {
        Self::new()
    }
}
