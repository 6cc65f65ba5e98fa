//! Unit tests for the planning orchestrator.

use super::*;
use crate::cache::{CacheConfig, CachePolicy};
use crate::domain::{Route, Station, StationId};
use crate::gateway::GatewayConfig;
use crate::geocode::{ResolveError, ResolverConfig};
use crate::ors::OrsError;
use crate::planner::PlannerError;
use crate::spatial::{METERS_PER_MILE, unproject};
use geo::{Rect, coord};
use std::sync::Mutex;
use std::time::Duration;

/// Point `north` miles off the equator at route mile `mile`.
fn point(mile: f64, north: f64) -> Coordinate {
    unproject(coord! { x: mile * METERS_PER_MILE, y: north * METERS_PER_MILE }).unwrap()
}

fn station(id: u64, name: &str, price: f64, location: Coordinate) -> Station {
    Station {
        id: StationId(id),
        opis_id: None,
        name: name.to_string(),
        address: String::new(),
        city: "Testville".to_string(),
        state: "TX".to_string(),
        rack_id: None,
        price,
        location: Some(location),
    }
}

fn fuel_poi(name: &str, location: Coordinate) -> Poi {
    Poi {
        name: name.to_string(),
        location,
        categories: vec!["fuel".to_string()],
        website: String::new(),
        opening_hours: String::new(),
    }
}

/// Mock upstream serving both geocoding and routing.
struct MockUpstream {
    route_ok: bool,
    pois: Vec<Poi>,
    geocode_calls: Mutex<usize>,
    route_calls: Mutex<usize>,
    poi_calls: Mutex<usize>,
}

impl MockUpstream {
    fn new() -> Self {
        Self {
            route_ok: true,
            pois: vec![fuel_poi("Corner Gas", point(510.0, 3.0))],
            geocode_calls: Mutex::new(0),
            route_calls: Mutex::new(0),
            poi_calls: Mutex::new(0),
        }
    }

    fn without_pois(mut self) -> Self {
        self.pois.clear();
        self
    }

    fn with_failing_route(mut self) -> Self {
        self.route_ok = false;
        self
    }

    fn calls(&self) -> (usize, usize, usize) {
        (
            *self.geocode_calls.lock().unwrap(),
            *self.route_calls.lock().unwrap(),
            *self.poi_calls.lock().unwrap(),
        )
    }
}

impl Geocoder for MockUpstream {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ResolveError> {
        *self.geocode_calls.lock().unwrap() += 1;
        Ok(match address {
            "Start, TX" => Some(point(0.0, 0.0)),
            "End, TX" => Some(point(510.0, 0.0)),
            _ => None,
        })
    }
}

impl RoutingProvider for MockUpstream {
    async fn directions(&self, start: Coordinate, end: Coordinate) -> Result<Route, OrsError> {
        *self.route_calls.lock().unwrap() += 1;
        if !self.route_ok {
            return Err(OrsError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        let geometry = RouteGeometry::from(vec![start, point(250.0, 0.0), end]);
        Ok(Route::from_meters(geometry, 510.0 * METERS_PER_MILE))
    }

    async fn pois(&self, _bbox: Rect<f64>, _buffer_meters: u32) -> Result<Vec<Poi>, OrsError> {
        *self.poi_calls.lock().unwrap() += 1;
        Ok(self.pois.clone())
    }
}

struct Harness {
    service: PlanService<MockUpstream, MockUpstream>,
    upstream: Arc<MockUpstream>,
}

fn harness_with(upstream: MockUpstream, plans: CachePolicy, config: PlanServiceConfig) -> Harness {
    let upstream = Arc::new(upstream);
    let caches = CacheConfig::default();

    let resolver = Resolver::new(
        Arc::clone(&upstream),
        TimedCache::new(caches.addresses),
        &ResolverConfig::default(),
    );
    let gateway =
        Gateway::with_cache_config(Arc::clone(&upstream), &caches, GatewayConfig::default());
    let catalog = StationCatalog::from_stations(vec![
        station(0, "Pricey", 3.9, point(510.0, 5.0)),
        station(1, "Cheap", 3.1, point(510.0, 20.0)),
    ]);

    Harness {
        service: PlanService::new(resolver, gateway, catalog, TimedCache::new(plans), config),
        upstream,
    }
}

fn harness(upstream: MockUpstream) -> Harness {
    harness_with(upstream, CachePolicy::plans(), PlanServiceConfig::default())
}

fn by_address() -> PlanRequest {
    PlanRequest::new(
        Endpoint::Address("Start, TX".to_string()),
        Endpoint::Address("End, TX".to_string()),
    )
}

#[tokio::test]
async fn plans_a_route_from_addresses() {
    let h = harness(MockUpstream::new());

    let result = h.service.plan(by_address()).await.unwrap();

    assert_eq!(result.distance_miles, 510.0);
    assert_eq!(result.fuel_stops.len(), 1);
    assert_eq!(result.fuel_stops[0].station, "Cheap");
    assert_eq!(result.fuel_stops[0].cost, 155.0);
    assert_eq!(result.total_fuel_cost, 155.0);
    assert_eq!(result.start_address, point(0.0, 0.0));
    assert_eq!(result.end_address, point(510.0, 0.0));
    assert_eq!(result.pois.len(), 1);
    assert_eq!(h.upstream.calls(), (2, 1, 1));
}

#[tokio::test]
async fn repeated_request_is_served_from_cache() {
    let h = harness(MockUpstream::new());

    let first = h.service.plan(by_address()).await.unwrap();
    let second = h.service.plan(by_address()).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(h.upstream.calls(), (2, 1, 1));
}

#[tokio::test]
async fn category_is_part_of_the_cache_key() {
    let h = harness(MockUpstream::new());

    let first = h.service.plan(by_address()).await.unwrap();
    let other = h
        .service
        .plan(by_address().with_category("fuel_station"))
        .await;

    // The mock's only POI is "fuel", so the other category finds nothing.
    assert!(matches!(other, Err(PlanError::NoPois)));
    let again = h.service.plan(by_address()).await.unwrap();
    assert!(Arc::ptr_eq(&first, &again));
}

#[tokio::test]
async fn plan_cache_expires() {
    let h = harness_with(
        MockUpstream::new(),
        CachePolicy::ttl(Duration::from_millis(50)),
        PlanServiceConfig::default(),
    );

    let first = h.service.plan(by_address()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    let second = h.service.plan(by_address()).await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[tokio::test]
async fn coordinates_skip_geocoding() {
    let h = harness(MockUpstream::new());
    let request = PlanRequest::new(
        Endpoint::Coordinate(point(0.0, 0.0)),
        Endpoint::Coordinate(point(510.0, 0.0)),
    );

    let result = h.service.plan(request).await.unwrap();
    assert_eq!(result.fuel_stops.len(), 1);
    assert_eq!(h.upstream.calls().0, 0);
}

#[tokio::test]
async fn mixed_endpoints_geocode_one_side() {
    let h = harness(MockUpstream::new());
    let request = PlanRequest::new(
        Endpoint::Coordinate(point(0.0, 0.0)),
        Endpoint::Address("End, TX".to_string()),
    );

    h.service.plan(request).await.unwrap();
    assert_eq!(h.upstream.calls().0, 1);
}

#[tokio::test]
async fn no_pois_is_not_found() {
    let h = harness(MockUpstream::new().without_pois());

    let result = h.service.plan(by_address()).await;
    assert!(matches!(result, Err(PlanError::NoPois)));

    let _ = h.service.plan(by_address()).await;
    // The POI cache holds the empty answer; the plan itself was not cached.
    assert_eq!(h.upstream.calls().1, 1);
}

#[tokio::test]
async fn blank_address_is_invalid_input() {
    let h = harness(MockUpstream::new());
    let request = PlanRequest::new(
        Endpoint::Address("  ".to_string()),
        Endpoint::Address("End, TX".to_string()),
    );

    assert!(matches!(
        h.service.plan(request).await,
        Err(PlanError::InvalidInput(_))
    ));
    assert_eq!(h.upstream.calls(), (0, 0, 0));
}

#[tokio::test]
async fn unknown_address_fails_resolution() {
    let h = harness(MockUpstream::new());
    let request = PlanRequest::new(
        Endpoint::Address("Start, TX".to_string()),
        Endpoint::Address("Atlantis".to_string()),
    );

    let result = h.service.plan(request).await;
    assert!(matches!(
        result,
        Err(PlanError::Resolve(ResolveError::AddressNotFound(_)))
    ));
}

#[tokio::test]
async fn degraded_route_is_returned_but_not_cached() {
    let h = harness(MockUpstream::new().with_failing_route());

    let first = h.service.plan(by_address()).await.unwrap();
    assert_eq!(first.distance_miles, 0.0);
    assert!(first.fuel_stops.is_empty());
    assert_eq!(first.pois.len(), 1);

    h.service.plan(by_address()).await.unwrap();
    assert_eq!(h.upstream.calls().1, 2);
}

#[tokio::test]
async fn poi_candidates_use_assumed_price() {
    let h = harness_with(
        MockUpstream::new(),
        CachePolicy::plans(),
        PlanServiceConfig::default().with_candidates(CandidateSource::Pois),
    );

    let result = h.service.plan(by_address()).await.unwrap();
    assert_eq!(result.fuel_stops.len(), 1);
    assert_eq!(result.fuel_stops[0].station, "Corner Gas");
    assert_eq!(result.fuel_stops[0].price_per_gallon, 4.5);
    assert_eq!(result.fuel_stops[0].city, "");
}

#[tokio::test]
async fn empty_catalog_loads_from_csv() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv = dir.path().join("prices.csv");
    std::fs::write(
        &csv,
        "OPIS Truckstop ID,Truckstop Name,Address,City,State,Rack ID,Retail Price\n",
    )
    .unwrap();

    let upstream = Arc::new(MockUpstream::new());
    let caches = CacheConfig::default();
    let service = PlanService::new(
        Resolver::new(
            Arc::clone(&upstream),
            TimedCache::new(caches.addresses),
            &ResolverConfig::default(),
        ),
        Gateway::with_cache_config(Arc::clone(&upstream), &caches, GatewayConfig::default()),
        StationCatalog::new(),
        TimedCache::new(caches.plans),
        PlanServiceConfig::new(&csv),
    );

    // A header-only feed loads zero stations.
    let result = service.plan(by_address()).await;
    assert!(matches!(
        result,
        Err(PlanError::Planner(PlannerError::NoStations))
    ));

    let missing = PlanService::new(
        Resolver::new(
            Arc::clone(&upstream),
            TimedCache::new(caches.addresses),
            &ResolverConfig::default(),
        ),
        Gateway::with_cache_config(Arc::clone(&upstream), &caches, GatewayConfig::default()),
        StationCatalog::new(),
        TimedCache::new(caches.plans),
        PlanServiceConfig::new(dir.path().join("missing.csv")),
    );
    assert!(matches!(
        missing.plan(by_address()).await,
        Err(PlanError::Catalog(_))
    ));
}

#[test]
fn endpoint_display() {
    assert_eq!(Endpoint::Address("Austin, TX".into()).to_string(), "Austin, TX");
    let c = Coordinate::new(1.5, 2.5).unwrap();
    assert_eq!(Endpoint::Coordinate(c).to_string(), "1.5,2.5");
}
