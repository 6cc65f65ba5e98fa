//! Application state for the web layer.

use std::sync::Arc;

use crate::plan::PlanService;

/// Shared application state.
///
/// Generic over the upstream geocoder and routing provider so tests can
/// serve the real router over mocks.
pub struct AppState<G, P> {
    /// Planning orchestrator
    pub planner: Arc<PlanService<G, P>>,
}

impl<G, P> Clone for AppState<G, P> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
        }
    }
}

impl<G, P> AppState<G, P> {
    /// Create a new app state.
    pub fn new(planner: PlanService<G, P>) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
