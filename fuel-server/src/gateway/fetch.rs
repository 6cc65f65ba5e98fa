//! Cached, degrade-on-failure fetches of routes and POIs.

use std::sync::Arc;

use geo::{Rect, coord};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use crate::cache::{CacheConfig, TimedCache};
use crate::domain::{Coordinate, Poi, Route, RouteGeometry, filter_by_category};
use crate::ors::OrsError;

use super::provider::RoutingProvider;

/// Degrees added on every side of the endpoint bounding box.
const BBOX_MARGIN_DEGREES: f64 = 0.001;

/// Route cache, keyed by `(start, end)`.
pub type RouteCache = TimedCache<(Coordinate, Coordinate), Route>;

/// POI cache.
pub type PoiCache = TimedCache<PoiKey, Vec<Poi>>;

/// Key for one POI query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoiKey {
    pub geometry: RouteGeometry,
    pub buffer_meters: u32,
    pub category: Option<String>,
}

/// Gateway tuning.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Maximum fetches in flight at once.
    pub pool_size: usize,

    /// Buffer around the bounding box for the POI half of a fan-out (meters).
    pub poi_buffer_meters: u32,
}

impl GatewayConfig {
    /// Create a config with explicit values.
    pub fn new(pool_size: usize, poi_buffer_meters: u32) -> Self {
        Self {
            pool_size,
            poi_buffer_meters,
        }
    }

    /// Set the worker pool size.
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    /// Set the POI buffer.
    pub fn with_poi_buffer_meters(mut self, meters: u32) -> Self {
        self.poi_buffer_meters = meters;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            pool_size: 4,
            poi_buffer_meters: 500,
        }
    }
}

/// Route and POIs fetched together. Either half may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteAndPois {
    pub route: Route,
    pub pois: Vec<Poi>,
}

/// Bounding box around a geometry's first and last points, widened by a
/// small margin. `None` for an empty geometry.
///
/// Only the endpoints are used, so a route that bulges outside the box
/// between them is not fully covered.
pub fn route_bbox(geometry: &RouteGeometry) -> Option<Rect<f64>> {
    let (first, last) = geometry.endpoints()?;
    let corners = Rect::new(
        coord! { x: first.lon(), y: first.lat() },
        coord! { x: last.lon(), y: last.lat() },
    );
    let (min, max) = (corners.min(), corners.max());

    Some(Rect::new(
        coord! { x: min.x - BBOX_MARGIN_DEGREES, y: min.y - BBOX_MARGIN_DEGREES },
        coord! { x: max.x + BBOX_MARGIN_DEGREES, y: max.y + BBOX_MARGIN_DEGREES },
    ))
}

/// Caching front for a [`RoutingProvider`].
///
/// Cloning is cheap; clones share the provider, caches and worker pool.
pub struct Gateway<P> {
    provider: Arc<P>,
    routes: RouteCache,
    pois: PoiCache,
    pool: Arc<Semaphore>,
    config: GatewayConfig,
}

impl<P> Clone for Gateway<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            routes: self.routes.clone(),
            pois: self.pois.clone(),
            pool: Arc::clone(&self.pool),
            config: self.config.clone(),
        }
    }
}

impl<P: RoutingProvider> Gateway<P> {
    /// Create a gateway with explicit caches.
    pub fn new(provider: Arc<P>, routes: RouteCache, pois: PoiCache, config: GatewayConfig) -> Self {
        Self {
            provider,
            routes,
            pois,
            pool: Arc::new(Semaphore::new(config.pool_size.max(1))),
            config,
        }
    }

    /// Create a gateway with fresh caches built from `caches`.
    pub fn with_cache_config(provider: Arc<P>, caches: &CacheConfig, config: GatewayConfig) -> Self {
        Self::new(
            provider,
            TimedCache::new(caches.routes),
            TimedCache::new(caches.pois),
            config,
        )
    }

    /// Driving route between two points.
    ///
    /// Any upstream failure yields [`Route::empty`], which is not cached.
    pub async fn fetch_route(&self, start: Coordinate, end: Coordinate) -> Route {
        let key = (start, end);
        if let Some(hit) = self.routes.get(&key).await {
            debug!(%start, %end, "route cache hit");
            return hit;
        }

        let result = self
            .routes
            .try_get_with(key, async {
                debug!(%start, %end, "route cache miss");
                self.provider.directions(start, end).await
            })
            .await;

        match result {
            Ok(route) => route,
            Err(e) => {
                warn!(%start, %end, error = %e, "route fetch failed, continuing without geometry");
                Route::empty()
            }
        }
    }

    /// Points of interest around a route's endpoints, optionally filtered
    /// to one category.
    ///
    /// An empty geometry returns nothing without calling upstream. Any
    /// upstream failure yields an empty list, which is not cached.
    pub async fn fetch_pois(
        &self,
        geometry: &RouteGeometry,
        buffer_meters: u32,
        category: Option<&str>,
    ) -> Vec<Poi> {
        let Some(bbox) = route_bbox(geometry) else {
            return Vec::new();
        };

        let key = PoiKey {
            geometry: geometry.clone(),
            buffer_meters,
            category: category.map(str::to_string),
        };
        if let Some(hit) = self.pois.get(&key).await {
            debug!(points = geometry.len(), ?category, "poi cache hit");
            return hit;
        }

        let result = self
            .pois
            .try_get_with(key, async {
                debug!(points = geometry.len(), ?category, "poi cache miss");
                let pois = self.provider.pois(bbox, buffer_meters).await?;
                Ok::<_, OrsError>(filter_by_category(pois, category))
            })
            .await;

        match result {
            Ok(pois) => pois,
            Err(e) => {
                warn!(error = %e, "poi fetch failed, continuing without POIs");
                Vec::new()
            }
        }
    }

    /// Fetch the route and the POIs concurrently on the worker pool.
    ///
    /// Each half is its own task and fails independently, so the result
    /// may be partial. Both tasks run to completion before returning.
    pub async fn fetch_route_and_pois(
        &self,
        start: Coordinate,
        end: Coordinate,
        geometry: RouteGeometry,
        category: Option<String>,
    ) -> RouteAndPois {
        let route_task = {
            let gateway = self.clone();
            tokio::spawn(async move {
                let Ok(_permit) = gateway.pool.acquire().await else {
                    return Route::empty();
                };
                gateway.fetch_route(start, end).await
            })
        };

        let pois_task = {
            let gateway = self.clone();
            tokio::spawn(async move {
                let Ok(_permit) = gateway.pool.acquire().await else {
                    return Vec::new();
                };
                let buffer = gateway.config.poi_buffer_meters;
                gateway
                    .fetch_pois(&geometry, buffer, category.as_deref())
                    .await
            })
        };

        let (route, pois) = tokio::join!(route_task, pois_task);

        let route = route.unwrap_or_else(|e| {
            error!(%start, %end, error = %e, "route task failed");
            Route::empty()
        });
        let pois = pois.unwrap_or_else(|e| {
            error!(%start, %end, error = %e, "poi task failed");
            Vec::new()
        });

        RouteAndPois { route, pois }
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
