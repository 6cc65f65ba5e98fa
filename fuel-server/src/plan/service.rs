//! Request-level planning with a result cache.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::TimedCache;
use crate::catalog::StationCatalog;
use crate::domain::{Coordinate, PlanResult, Poi, PoiStation, RouteGeometry, StopPlan};
use crate::gateway::{Gateway, RouteAndPois, RoutingProvider};
use crate::geocode::{Geocoder, Resolver};
use crate::planner::{PlannerConfig, compute_stops};

use super::error::PlanError;

/// Plan result cache.
pub type PlanCache = TimedCache<PlanKey, Arc<PlanResult>>;

/// One end of a trip: a free-text address or a known coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Address(String),
    Coordinate(Coordinate),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Address(address) => f.write_str(address),
            Endpoint::Coordinate(c) => write!(f, "{}", c),
        }
    }
}

/// Where refueling candidates come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateSource {
    /// Priced stations from the catalog.
    #[default]
    Catalog,

    /// POIs along the route at an assumed price.
    Pois,
}

/// Request for a fuel plan.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub start: Endpoint,
    pub end: Endpoint,

    /// POI category filter; the service default applies when `None`.
    pub category: Option<String>,
}

impl PlanRequest {
    /// Create a new plan request.
    pub fn new(start: Endpoint, end: Endpoint) -> Self {
        Self {
            start,
            end,
            category: None,
        }
    }

    /// Set the POI category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validate the plan request.
    pub fn validate(&self) -> Result<(), PlanError> {
        let blank = |e: &Endpoint| matches!(e, Endpoint::Address(a) if a.trim().is_empty());

        if blank(&self.start) || blank(&self.end) {
            return Err(PlanError::InvalidInput(
                "Both 'start' and 'end' addresses are required".to_string(),
            ));
        }

        Ok(())
    }
}

/// Key for one cached plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanKey {
    pub start: Endpoint,
    pub end: Endpoint,
    pub category: Option<String>,
}

/// Orchestrator settings.
#[derive(Debug, Clone)]
pub struct PlanServiceConfig {
    pub planner: PlannerConfig,

    pub candidates: CandidateSource,

    /// Category filter used when a request names none.
    pub default_category: Option<String>,

    /// Price CSV used to populate an empty catalog.
    pub stations_csv: PathBuf,
}

impl PlanServiceConfig {
    /// Create a config reading stations from `stations_csv`.
    pub fn new(stations_csv: impl Into<PathBuf>) -> Self {
        Self {
            stations_csv: stations_csv.into(),
            ..Self::default()
        }
    }

    /// Set the planner configuration.
    pub fn with_planner(mut self, planner: PlannerConfig) -> Self {
        self.planner = planner;
        self
    }

    /// Set the candidate source.
    pub fn with_candidates(mut self, candidates: CandidateSource) -> Self {
        self.candidates = candidates;
        self
    }

    /// Set the default category filter.
    pub fn with_default_category(mut self, category: Option<String>) -> Self {
        self.default_category = category;
        self
    }
}

impl Default for PlanServiceConfig {
    fn default() -> Self {
        Self {
            planner: PlannerConfig::default(),
            candidates: CandidateSource::default(),
            default_category: Some("fuel".to_string()),
            stations_csv: PathBuf::from("fuel-prices-for-be-assessment.csv"),
        }
    }
}

/// Plans fuel stops for whole requests.
pub struct PlanService<G, P> {
    resolver: Resolver<G>,
    gateway: Gateway<P>,
    catalog: StationCatalog,
    plans: PlanCache,
    config: PlanServiceConfig,
}

impl<G: Geocoder, P: RoutingProvider> PlanService<G, P> {
    /// Create a new plan service.
    pub fn new(
        resolver: Resolver<G>,
        gateway: Gateway<P>,
        catalog: StationCatalog,
        plans: PlanCache,
        config: PlanServiceConfig,
    ) -> Self {
        Self {
            resolver,
            gateway,
            catalog,
            plans,
            config,
        }
    }

    /// The station catalog.
    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    /// Plan fuel stops for a request.
    ///
    /// Results are cached by `(start, end, category)`. A result whose route
    /// could not be fetched is returned but not cached.
    pub async fn plan(&self, request: PlanRequest) -> Result<Arc<PlanResult>, PlanError> {
        request.validate()?;

        let category = request
            .category
            .clone()
            .or_else(|| self.config.default_category.clone());
        let key = PlanKey {
            start: request.start.clone(),
            end: request.end.clone(),
            category: category.clone(),
        };

        if let Some(hit) = self.plans.get(&key).await {
            debug!(start = %request.start, end = %request.end, "plan cache hit");
            return Ok(hit);
        }

        let (start, end) = self.resolve_endpoints(&request.start, &request.end).await?;

        let seed = RouteGeometry::from([start, end]);
        let RouteAndPois { route, pois } = self
            .gateway
            .fetch_route_and_pois(start, end, seed, category)
            .await;

        if pois.is_empty() {
            return Err(PlanError::NoPois);
        }

        let stops = self.compute(&route.geometry, &pois).await?;
        let degraded = route.is_empty();
        let result = Arc::new(PlanResult::new(route.miles, stops, start, end, pois));

        info!(
            %start,
            %end,
            miles = result.distance_miles,
            stops = result.fuel_stops.len(),
            total = result.total_fuel_cost,
            "planned route"
        );

        if !degraded {
            self.plans.insert(key, Arc::clone(&result)).await;
        }

        Ok(result)
    }

    async fn resolve_endpoints(
        &self,
        start: &Endpoint,
        end: &Endpoint,
    ) -> Result<(Coordinate, Coordinate), PlanError> {
        match (start, end) {
            (Endpoint::Address(a), Endpoint::Address(b)) => {
                let pair = self.resolver.resolve_pair(a, b).await?;
                Ok((pair.start, pair.end))
            }
            _ => Ok((self.resolve_one(start).await?, self.resolve_one(end).await?)),
        }
    }

    async fn resolve_one(&self, endpoint: &Endpoint) -> Result<Coordinate, PlanError> {
        match endpoint {
            Endpoint::Address(address) => Ok(self.resolver.resolve(address).await?),
            Endpoint::Coordinate(c) => Ok(*c),
        }
    }

    async fn compute(&self, route: &RouteGeometry, pois: &[Poi]) -> Result<StopPlan, PlanError> {
        let planner = &self.config.planner;

        let stops = match self.config.candidates {
            CandidateSource::Catalog => {
                self.catalog
                    .load_if_empty(&self.config.stations_csv, self.resolver.geocoder().as_ref())
                    .await?;
                let stations = self.catalog.list_all().await;
                compute_stops(route, &stations, planner)?
            }
            CandidateSource::Pois => {
                let candidates: Vec<PoiStation> =
                    pois.iter().cloned().map(PoiStation::new).collect();
                compute_stops(route, &candidates, planner)?
            }
        };

        Ok(stops)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
