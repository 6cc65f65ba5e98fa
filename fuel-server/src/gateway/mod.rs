//! External data gateway.
//!
//! Fetches route geometry and nearby points of interest from the routing
//! provider. Both are optional enrichment for a plan, so every upstream
//! failure degrades to an empty result instead of an error.

mod fetch;
mod provider;

pub use fetch::{
    Gateway, GatewayConfig, PoiCache, PoiKey, RouteAndPois, RouteCache, route_bbox,
};
pub use provider::RoutingProvider;
