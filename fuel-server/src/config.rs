//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::ors::DEFAULT_BASE_URL;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default fuel price feed.
const DEFAULT_STATIONS_CSV: &str = "fuel-prices-for-be-assessment.csv";

/// Default POI category filter.
const DEFAULT_POI_CATEGORY: &str = "fuel";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// OpenRouteService API key (empty if unset; upstream calls will fail).
    pub ors_api_key: String,

    pub ors_base_url: String,

    pub bind_addr: SocketAddr,

    /// Path to the fuel price CSV.
    pub stations_csv: PathBuf,

    /// Default POI category filter; `None` when set to an empty string.
    pub poi_category: Option<String>,
}

impl ServerConfig {
    /// Read settings from the process environment.
    ///
    /// | Variable       | Default                              |
    /// |----------------|--------------------------------------|
    /// | `ORS_API_KEY`  | none (warns)                         |
    /// | `ORS_BASE_URL` | `https://api.openrouteservice.org`   |
    /// | `BIND_ADDR`    | `127.0.0.1:8000`                     |
    /// | `STATIONS_CSV` | `fuel-prices-for-be-assessment.csv`  |
    /// | `POI_CATEGORY` | `fuel`                               |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ors_api_key = lookup("ORS_API_KEY").unwrap_or_else(|| {
            warn!("ORS_API_KEY not set, routing and geocoding calls will fail");
            String::new()
        });

        let ors_base_url = lookup("ORS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind.clone(),
        })?;

        let stations_csv = lookup("STATIONS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIONS_CSV));

        let poi_category = match lookup("POI_CATEGORY") {
            Some(c) if c.trim().is_empty() => None,
            Some(c) => Some(c),
            None => Some(DEFAULT_POI_CATEGORY.to_string()),
        };

        Ok(Self {
            ors_api_key,
            ors_base_url,
            bind_addr,
            stations_csv,
            poi_category,
        })
    }
}
