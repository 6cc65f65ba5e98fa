//! Planning orchestrator.
//!
//! Ties the pieces together for one request: resolve the endpoints, fetch
//! the route and POIs, choose stops, and cache the finished result.

mod error;
mod service;

pub use error::PlanError;
pub use service::{
    CandidateSource, Endpoint, PlanCache, PlanKey, PlanRequest, PlanService, PlanServiceConfig,
};
