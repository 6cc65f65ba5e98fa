//! JSON snapshot of a geocoded catalog.
//!
//! Geocoding the whole price feed is slow and rate limited, so the result
//! is written next to the CSV and reused on the next start.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Station;

use super::error::CatalogError;

/// Snapshot file contents with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    /// Unix timestamp when the snapshot was written.
    written_at_secs: u64,
    stations: Vec<Station>,
}

/// Disk snapshot for the station catalog.
#[derive(Debug, Clone)]
pub struct StationSnapshot {
    path: PathBuf,
}

impl StationSnapshot {
    /// Snapshot stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot that sits next to a price CSV (`prices.csv` →
    /// `prices.stations.json`).
    pub fn beside(csv_path: &Path) -> Self {
        Self::new(csv_path.with_extension("stations.json"))
    }

    /// Try to load stations from the snapshot.
    ///
    /// Returns `None` if the snapshot doesn't exist or is invalid.
    pub fn load(&self) -> Option<Vec<Station>> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let snapshot: SnapshotFile = serde_json::from_str(&contents).ok()?;

        debug!(
            age_secs = age_secs(snapshot.written_at_secs, unix_now()),
            path = %self.path.display(),
            "read station snapshot"
        );
        Some(snapshot.stations)
    }

    /// Save stations to the snapshot.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, stations: &[Station]) -> Result<(), CatalogError> {
        let written_at_secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| CatalogError::Snapshot {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let snapshot = SnapshotFile {
            written_at_secs,
            stations: stations.to_vec(),
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::Snapshot {
                message: format!("failed to create snapshot directory: {}", e),
            })?;
        }

        let json = serde_json::to_string(&snapshot).map_err(|e| CatalogError::Snapshot {
            message: format!("failed to serialize snapshot: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| CatalogError::Snapshot {
            message: format!("failed to write snapshot file: {}", e),
        })?;

        Ok(())
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Seconds since the Unix epoch, or 0 if the clock is earlier.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Snapshot age in seconds; a timestamp in the future counts as fresh.
fn age_secs(written_at_secs: u64, now_secs: u64) -> u64 {
    now_secs.saturating_sub(written_at_secs)
}
