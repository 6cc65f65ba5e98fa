use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fuel_server::cache::{CacheConfig, TimedCache};
use fuel_server::catalog::StationCatalog;
use fuel_server::config::ServerConfig;
use fuel_server::gateway::{Gateway, GatewayConfig};
use fuel_server::geocode::{Resolver, ResolverConfig};
use fuel_server::ors::{OrsClient, OrsConfig};
use fuel_server::plan::{PlanService, PlanServiceConfig};
use fuel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // One client serves geocoding and routing; its semaphore bounds both.
    let ors_config = OrsConfig::new(&config.ors_api_key).with_base_url(&config.ors_base_url);
    let ors = Arc::new(OrsClient::new(ors_config)?);

    let caches = CacheConfig::default();
    let resolver = Resolver::new(
        Arc::clone(&ors),
        TimedCache::new(caches.addresses),
        &ResolverConfig::default(),
    );
    let gateway = Gateway::with_cache_config(Arc::clone(&ors), &caches, GatewayConfig::default());

    let catalog = StationCatalog::new();
    match catalog.load_if_empty(&config.stations_csv, ors.as_ref()).await {
        Ok(count) => info!(count, "station catalog ready"),
        Err(e) => warn!(
            error = %e,
            path = %config.stations_csv.display(),
            "station catalog not loaded, will retry on first request"
        ),
    }

    let plan_config = PlanServiceConfig::new(&config.stations_csv)
        .with_default_category(config.poi_category.clone());
    let service = PlanService::new(
        resolver,
        gateway,
        catalog,
        TimedCache::new(caches.plans),
        plan_config,
    );

    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "fuel route planner listening");
    info!("  GET  /health     - Health check");
    info!("  POST /api/route  - Plan fuel stops");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
