//! Planning request error types.

use crate::catalog::CatalogError;
use crate::geocode::ResolveError;
use crate::planner::PlannerError;

/// Errors from serving one planning request.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The request itself is unusable.
    #[error("{0}")]
    InvalidInput(String),

    /// The routing provider found no points of interest along the route.
    #[error("No POIs found along the route")]
    NoPois,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
