//! Memoizing address resolver.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::TimedCache;
use crate::domain::Coordinate;
use crate::ors::OrsClient;

use super::error::ResolveError;

/// Default number of concurrent lookups.
const DEFAULT_POOL_SIZE: usize = 2;

/// Upstream forward geocoder.
///
/// This abstraction allows the resolver to be tested without network access.
pub trait Geocoder: Send + Sync + 'static {
    /// Best match for `address`, or `Ok(None)` when nothing matched.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, ResolveError>> + Send;
}

impl Geocoder for OrsClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ResolveError> {
        OrsClient::geocode(self, address)
            .await
            .map_err(|e| ResolveError::Geocoder {
                address: address.to_string(),
                message: e.to_string(),
            })
    }
}

/// Configuration for the resolver's worker pool.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum lookups in flight at once.
    pub pool_size: usize,
}

impl ResolverConfig {
    /// Set the worker pool size.
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

/// Coordinates for a start/end address pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressPair {
    pub start: Coordinate,
    pub end: Coordinate,
}

/// Resolves free-text addresses to coordinates, memoized by exact address.
///
/// Cloning is cheap; clones share the cache and the worker pool.
pub struct Resolver<G> {
    geocoder: Arc<G>,
    cache: TimedCache<String, Coordinate>,
    pool: Arc<Semaphore>,
}

impl<G> Clone for Resolver<G> {
    fn clone(&self) -> Self {
        Self {
            geocoder: Arc::clone(&self.geocoder),
            cache: self.cache.clone(),
            pool: Arc::clone(&self.pool),
        }
    }
}

impl<G: Geocoder> Resolver<G> {
    /// Create a resolver over `geocoder`, memoizing into `cache`.
    pub fn new(geocoder: Arc<G>, cache: TimedCache<String, Coordinate>, config: &ResolverConfig) -> Self {
        Self {
            geocoder,
            cache,
            pool: Arc::new(Semaphore::new(config.pool_size.max(1))),
        }
    }

    /// The underlying geocoder.
    pub fn geocoder(&self) -> &Arc<G> {
        &self.geocoder
    }

    /// Resolve one address.
    ///
    /// Hits are served from the cache. Concurrent misses for the same
    /// address share one upstream call. Failures are not cached.
    pub async fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        if address.trim().is_empty() {
            return Err(ResolveError::AddressNotFound(address.to_string()));
        }

        if let Some(hit) = self.cache.get(&address.to_string()).await {
            debug!(address, "geocode cache hit");
            return Ok(hit);
        }

        self.cache
            .try_get_with(address.to_string(), async {
                debug!(address, "geocode cache miss");
                self.geocoder
                    .geocode(address)
                    .await?
                    .ok_or_else(|| ResolveError::AddressNotFound(address.to_string()))
            })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Resolve both addresses concurrently.
    ///
    /// Each lookup runs as its own task on the worker pool, so a cache hit
    /// on one side never waits for the other side's network call. Both
    /// lookups always run to completion; a failure on either side fails
    /// the pair.
    pub async fn resolve_pair(&self, start: &str, end: &str) -> Result<AddressPair, ResolveError> {
        let start_task = self.spawn_lookup(start.to_string());
        let end_task = self.spawn_lookup(end.to_string());

        let (start, end) = tokio::join!(start_task, end_task);

        Ok(AddressPair {
            start: flatten(start)?,
            end: flatten(end)?,
        })
    }

    fn spawn_lookup(&self, address: String) -> JoinHandle<Result<Coordinate, ResolveError>> {
        let resolver = self.clone();
        tokio::spawn(async move {
            let _permit = resolver
                .pool
                .acquire()
                .await
                .map_err(|_| ResolveError::Worker("pool closed".to_string()))?;
            resolver.resolve(&address).await
        })
    }
}

fn flatten(
    joined: Result<Result<Coordinate, ResolveError>, tokio::task::JoinError>,
) -> Result<Coordinate, ResolveError> {
    joined.map_err(|e| ResolveError::Worker(e.to_string()))?
}
