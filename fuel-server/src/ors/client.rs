//! OpenRouteService HTTP client.
//!
//! Provides async methods for driving directions, POI search and forward
//! geocoding. Every request carries the API key in the `Authorization`
//! header and is bounded by a short timeout so a slow upstream degrades the
//! plan instead of stalling it.

use std::sync::Arc;
use std::time::Duration;

use geo::Rect;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, Poi, Route};

use super::convert::{convert_directions, convert_geocode, convert_pois};
use super::error::OrsError;
use super::types::{
    DirectionsResponse, GeocodeResponse, PointGeometry, PoisGeometry, PoisRequest, PoisResponse,
};

/// Default base URL for the public OpenRouteService API.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Routing profile used for directions.
const PROFILE: &str = "driving-car";

/// Configuration for the ORS client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key sent as the `Authorization` header
    pub api_key: String,
    /// Base URL for the API (defaults to the public ORS API)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout
    pub timeout: Duration,
}

impl OrsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout: Duration::from_secs(3),
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenRouteService API client.
///
/// Uses a semaphore to limit concurrent requests and stay under the
/// provider's rate limits.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OrsClient {
    /// Create a new ORS client with the given configuration.
    pub fn new(config: OrsConfig) -> Result<Self, OrsError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| OrsError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Driving directions between two points.
    pub async fn directions(&self, start: Coordinate, end: Coordinate) -> Result<Route, OrsError> {
        let url = format!("{}/v2/directions/{}", self.base_url, PROFILE);
        let request = self.http.get(&url).query(&[
            ("start", lon_lat(start)),
            ("end", lon_lat(end)),
        ]);

        let resp: DirectionsResponse = self.send_json(request).await?;
        convert_directions(resp)
    }

    /// Points of interest inside `bbox` (x = longitude, y = latitude),
    /// widened by `buffer_meters`.
    pub async fn pois(&self, bbox: Rect<f64>, buffer_meters: u32) -> Result<Vec<Poi>, OrsError> {
        let url = format!("{}/pois", self.base_url);
        let (min, max) = (bbox.min(), bbox.max());
        let body = PoisRequest {
            request: "pois",
            geometry: PoisGeometry {
                bbox: [[min.x, min.y], [max.x, max.y]],
                geojson: PointGeometry {
                    kind: "Point".to_string(),
                    coordinates: [min.x, min.y],
                },
                buffer: buffer_meters,
            },
        };

        let resp: PoisResponse = self.send_json(self.http.post(&url).json(&body)).await?;
        convert_pois(resp)
    }

    /// Best match for a free-text address, or `None` when nothing matched.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, OrsError> {
        let url = format!("{}/geocode/search", self.base_url);
        let request = self
            .http
            .get(&url)
            .query(&[("text", address), ("size", "1")]);

        let resp: GeocodeResponse = self.send_json(request).await?;
        convert_geocode(resp)
    }

    /// Send a request under the concurrency limit and decode a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, OrsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OrsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url().path(), status = status.as_u16(), "ORS response");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(OrsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OrsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OrsError::Json {
            message: e.to_string(),
        })
    }
}

/// ORS expects `lon,lat` query values.
fn lon_lat(c: Coordinate) -> String {
    format!("{},{}", c.lon(), c.lat())
}
