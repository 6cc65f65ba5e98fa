//! Unit tests for the gateway's caching and degradation.

use super::*;
use crate::cache::CachePolicy;
use crate::ors::OrsError;
use std::sync::Mutex;
use std::time::Duration;

fn c(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

fn poi(name: &str, category: &str) -> Poi {
    Poi {
        name: name.to_string(),
        location: c(35.0, -100.0),
        categories: vec![category.to_string()],
        website: String::new(),
        opening_hours: String::new(),
    }
}

fn sample_route() -> Route {
    Route::from_meters(
        RouteGeometry::from(vec![c(35.0, -101.0), c(35.5, -100.5), c(36.0, -100.0)]),
        160_934.0,
    )
}

/// How a mock endpoint behaves.
enum Reply<T> {
    Ok(T),
    Fail,
    Panic,
}

/// Mock routing provider for testing.
struct MockProvider {
    route: Reply<Route>,
    pois: Reply<Vec<Poi>>,
    route_calls: Mutex<usize>,
    poi_calls: Mutex<usize>,
    last_bbox: Mutex<Option<Rect<f64>>>,
}

impl MockProvider {
    fn new(route: Reply<Route>, pois: Reply<Vec<Poi>>) -> Self {
        Self {
            route,
            pois,
            route_calls: Mutex::new(0),
            poi_calls: Mutex::new(0),
            last_bbox: Mutex::new(None),
        }
    }

    fn healthy() -> Self {
        Self::new(
            Reply::Ok(sample_route()),
            Reply::Ok(vec![poi("Shell", "fuel"), poi("Bench", "bench")]),
        )
    }

    fn route_calls(&self) -> usize {
        *self.route_calls.lock().unwrap()
    }

    fn poi_calls(&self) -> usize {
        *self.poi_calls.lock().unwrap()
    }
}

impl RoutingProvider for MockProvider {
    async fn directions(&self, _start: Coordinate, _end: Coordinate) -> Result<Route, OrsError> {
        *self.route_calls.lock().unwrap() += 1;
        match &self.route {
            Reply::Ok(route) => Ok(route.clone()),
            Reply::Fail => Err(OrsError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
            Reply::Panic => panic!("directions exploded"),
        }
    }

    async fn pois(&self, bbox: Rect<f64>, _buffer_meters: u32) -> Result<Vec<Poi>, OrsError> {
        *self.poi_calls.lock().unwrap() += 1;
        *self.last_bbox.lock().unwrap() = Some(bbox);
        match &self.pois {
            Reply::Ok(pois) => Ok(pois.clone()),
            Reply::Fail => Err(OrsError::RateLimited),
            Reply::Panic => panic!("pois exploded"),
        }
    }
}

fn make_gateway(provider: MockProvider) -> (Gateway<MockProvider>, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    let gateway = Gateway::with_cache_config(
        Arc::clone(&provider),
        &CacheConfig::default(),
        GatewayConfig::default(),
    );
    (gateway, provider)
}

fn seed() -> RouteGeometry {
    RouteGeometry::from([c(35.0, -101.0), c(36.0, -100.0)])
}

#[test]
fn default_config() {
    let config = GatewayConfig::default();
    assert_eq!(config.pool_size, 4);
    assert_eq!(config.poi_buffer_meters, 500);

    let config = GatewayConfig::new(1, 100).with_pool_size(2).with_poi_buffer_meters(250);
    assert_eq!(config.pool_size, 2);
    assert_eq!(config.poi_buffer_meters, 250);
}

#[test]
fn bbox_is_normalized_and_widened() {
    // End is south-west of start.
    let geometry = RouteGeometry::from(vec![c(36.0, -100.0), c(35.5, -99.0), c(35.0, -101.0)]);
    let bbox = route_bbox(&geometry).unwrap();

    assert!((bbox.min().x - -101.001).abs() < 1e-9);
    assert!((bbox.min().y - 34.999).abs() < 1e-9);
    assert!((bbox.max().x - -99.999).abs() < 1e-9);
    assert!((bbox.max().y - 36.001).abs() < 1e-9);
}

#[test]
fn bbox_of_empty_geometry() {
    assert!(route_bbox(&RouteGeometry::empty()).is_none());
}

#[tokio::test]
async fn route_is_cached() {
    let (gateway, provider) = make_gateway(MockProvider::healthy());
    let (start, end) = (c(35.0, -101.0), c(36.0, -100.0));

    let first = gateway.fetch_route(start, end).await;
    let second = gateway.fetch_route(start, end).await;

    assert_eq!(first, second);
    assert_eq!(first.geometry.len(), 3);
    assert!((first.miles - 100.0).abs() < 0.01);
    assert_eq!(provider.route_calls(), 1);
}

#[tokio::test]
async fn failed_route_degrades_and_is_not_cached() {
    let (gateway, provider) = make_gateway(MockProvider::new(Reply::Fail, Reply::Ok(Vec::new())));
    let (start, end) = (c(35.0, -101.0), c(36.0, -100.0));

    let route = gateway.fetch_route(start, end).await;
    assert!(route.is_empty());
    assert_eq!(route.miles, 0.0);

    gateway.fetch_route(start, end).await;
    assert_eq!(provider.route_calls(), 2);
}

#[tokio::test]
async fn pois_are_filtered_by_category() {
    let (gateway, _) = make_gateway(MockProvider::healthy());

    let fuel = gateway.fetch_pois(&seed(), 500, Some("fuel")).await;
    assert_eq!(fuel.len(), 1);
    assert_eq!(fuel[0].name, "Shell");

    let all = gateway.fetch_pois(&seed(), 500, None).await;
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn pois_cache_key_includes_buffer_and_category() {
    let (gateway, provider) = make_gateway(MockProvider::healthy());

    gateway.fetch_pois(&seed(), 500, Some("fuel")).await;
    gateway.fetch_pois(&seed(), 500, Some("fuel")).await;
    assert_eq!(provider.poi_calls(), 1);

    gateway.fetch_pois(&seed(), 1000, Some("fuel")).await;
    gateway.fetch_pois(&seed(), 500, None).await;
    assert_eq!(provider.poi_calls(), 3);
}

#[tokio::test]
async fn pois_cache_expires() {
    let provider = Arc::new(MockProvider::healthy());
    let gateway = Gateway::new(
        Arc::clone(&provider),
        TimedCache::new(CachePolicy::routes()),
        TimedCache::new(CachePolicy::ttl(Duration::from_millis(50))),
        GatewayConfig::default(),
    );

    gateway.fetch_pois(&seed(), 500, None).await;
    tokio::time::sleep(Duration::from_millis(120)).await;
    gateway.fetch_pois(&seed(), 500, None).await;

    assert_eq!(provider.poi_calls(), 2);
}

#[tokio::test]
async fn empty_geometry_skips_upstream() {
    let (gateway, provider) = make_gateway(MockProvider::healthy());

    let pois = gateway.fetch_pois(&RouteGeometry::empty(), 500, None).await;
    assert!(pois.is_empty());
    assert_eq!(provider.poi_calls(), 0);
}

#[tokio::test]
async fn pois_query_uses_endpoint_bbox() {
    let (gateway, provider) = make_gateway(MockProvider::healthy());

    gateway.fetch_pois(&seed(), 500, None).await;

    let bbox = provider.last_bbox.lock().unwrap().unwrap();
    assert_eq!(Some(bbox), route_bbox(&seed()));
}

#[tokio::test]
async fn failed_pois_degrade_and_are_not_cached() {
    let (gateway, provider) = make_gateway(MockProvider::new(Reply::Ok(sample_route()), Reply::Fail));

    assert!(gateway.fetch_pois(&seed(), 500, None).await.is_empty());
    gateway.fetch_pois(&seed(), 500, None).await;
    assert_eq!(provider.poi_calls(), 2);
}

#[tokio::test]
async fn fan_out_returns_both_halves() {
    let (gateway, provider) = make_gateway(MockProvider::healthy());
    let (start, end) = (c(35.0, -101.0), c(36.0, -100.0));

    let both = gateway
        .fetch_route_and_pois(start, end, seed(), Some("fuel".to_string()))
        .await;

    assert_eq!(both.route, sample_route());
    assert_eq!(both.pois.len(), 1);
    assert_eq!(provider.route_calls(), 1);
    assert_eq!(provider.poi_calls(), 1);
}

#[tokio::test]
async fn fan_out_keeps_pois_when_route_fails() {
    let (gateway, _) = make_gateway(MockProvider::new(
        Reply::Fail,
        Reply::Ok(vec![poi("Shell", "fuel")]),
    ));

    let both = gateway
        .fetch_route_and_pois(c(35.0, -101.0), c(36.0, -100.0), seed(), None)
        .await;

    assert!(both.route.is_empty());
    assert_eq!(both.pois.len(), 1);
}

#[tokio::test]
async fn fan_out_keeps_route_when_pois_fail() {
    let (gateway, _) = make_gateway(MockProvider::new(Reply::Ok(sample_route()), Reply::Fail));

    let both = gateway
        .fetch_route_and_pois(c(35.0, -101.0), c(36.0, -100.0), seed(), None)
        .await;

    assert_eq!(both.route, sample_route());
    assert!(both.pois.is_empty());
}

#[tokio::test]
async fn fan_out_survives_a_panicking_task() {
    let (gateway, _) = make_gateway(MockProvider::new(
        Reply::Panic,
        Reply::Ok(vec![poi("Shell", "fuel")]),
    ));

    let both = gateway
        .fetch_route_and_pois(c(35.0, -101.0), c(36.0, -100.0), seed(), None)
        .await;
    assert!(both.route.is_empty());
    assert_eq!(both.pois.len(), 1);

    let (gateway, _) = make_gateway(MockProvider::new(Reply::Ok(sample_route()), Reply::Panic));
    let both = gateway
        .fetch_route_and_pois(c(35.0, -101.0), c(36.0, -100.0), seed(), None)
        .await;
    assert_eq!(both.route, sample_route());
    assert!(both.pois.is_empty());
}
