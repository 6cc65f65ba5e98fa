//! Time-boxed caches for upstream responses and planning results.
//!
//! Every cache is an explicit object built from a [`CachePolicy`] and handed
//! to the component that owns it, so tests get fresh caches per instance.
//! Entries are never mutated after insert; staleness is bounded only by TTL.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

/// Expiry and capacity policy for one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Time-to-live for entries. `None` means entries never age out.
    pub ttl: Option<Duration>,

    /// Maximum number of entries. `None` means no size-based eviction.
    pub max_capacity: Option<u64>,
}

impl CachePolicy {
    /// Entries expire after `ttl`; no size bound.
    pub fn ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            max_capacity: None,
        }
    }

    /// Entries never expire; least-recently-used entries are evicted past `n`.
    pub fn bounded(n: u64) -> Self {
        Self {
            ttl: None,
            max_capacity: Some(n),
        }
    }

    /// Geocoded addresses: 1000 entries, no expiry.
    pub fn addresses() -> Self {
        Self::bounded(1000)
    }

    /// Route geometry: one hour.
    pub fn routes() -> Self {
        Self::ttl(Duration::from_secs(60 * 60))
    }

    /// Points of interest: a few seconds.
    pub fn pois() -> Self {
        Self::ttl(Duration::from_secs(5))
    }

    /// Full planning results: one hour.
    pub fn plans() -> Self {
        Self::ttl(Duration::from_secs(60 * 60))
    }
}

/// Policies for every cache in the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub addresses: CachePolicy,
    pub routes: CachePolicy,
    pub pois: CachePolicy,
    pub plans: CachePolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            addresses: CachePolicy::addresses(),
            routes: CachePolicy::routes(),
            pois: CachePolicy::pois(),
            plans: CachePolicy::plans(),
        }
    }
}

/// Shared key-value cache with policy-driven expiry.
///
/// Cloning is cheap and clones share storage.
pub struct TimedCache<K, V> {
    inner: MokaCache<K, V>,
}

impl<K, V> Clone for TimedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> TimedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache with the given policy.
    pub fn new(policy: CachePolicy) -> Self {
        let mut builder = MokaCache::builder();
        if let Some(ttl) = policy.ttl {
            builder = builder.time_to_live(ttl);
        }
        if let Some(n) = policy.max_capacity {
            builder = builder.max_capacity(n);
        }

        Self {
            inner: builder.build(),
        }
    }

    /// Get a live entry.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }

    /// Insert an entry, replacing any previous value for the key.
    pub async fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }

    /// Return the cached value or compute it with `init`.
    ///
    /// Concurrent callers for the same missing key share one `init` call.
    /// Errors are returned to every waiting caller and are not cached.
    pub async fn try_get_with<F, E>(&self, key: K, init: F) -> Result<V, Arc<E>>
    where
        F: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        self.inner.try_get_with(key, init).await
    }

    /// Approximate number of live entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Apply pending evictions so `entry_count` is accurate.
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policies() {
        let config = CacheConfig::default();

        assert_eq!(config.addresses.ttl, None);
        assert_eq!(config.addresses.max_capacity, Some(1000));
        assert_eq!(config.routes.ttl, Some(Duration::from_secs(3600)));
        assert_eq!(config.pois.ttl, Some(Duration::from_secs(5)));
        assert_eq!(config.plans.ttl, Some(Duration::from_secs(3600)));
        assert_eq!(config.routes.max_capacity, None);
    }

    #[tokio::test]
    async fn insert_and_get() {
        let cache: TimedCache<String, u32> = TimedCache::new(CachePolicy::routes());
        assert!(cache.get(&"a".to_string()).await.is_none());

        cache.insert("a".to_string(), 1).await;
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache: TimedCache<u8, u8> = TimedCache::new(CachePolicy::ttl(Duration::from_millis(50)));
        cache.insert(1, 1).await;
        assert_eq!(cache.get(&1).await, Some(1));

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(cache.get(&1).await, None);
    }

    #[tokio::test]
    async fn try_get_with_does_not_cache_errors() {
        let cache: TimedCache<u8, u8> = TimedCache::new(CachePolicy::bounded(10));

        let failed = cache.try_get_with(1, async { Err::<u8, &str>("boom") }).await;
        assert_eq!(*failed.unwrap_err(), "boom");
        assert!(cache.get(&1).await.is_none());

        let ok = cache.try_get_with(1, async { Ok::<u8, &str>(7) }).await;
        assert_eq!(ok.unwrap(), 7);
        assert_eq!(cache.get(&1).await, Some(7));
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let cache: TimedCache<u8, u8> = TimedCache::new(CachePolicy::bounded(10));
        let other = cache.clone();
        cache.insert(3, 9).await;

        assert_eq!(other.get(&3).await, Some(9));
        other.run_pending_tasks().await;
        assert_eq!(other.entry_count(), 1);
    }
}
