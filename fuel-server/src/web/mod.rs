//! Web layer for the fuel route planner.
//!
//! Provides a health check and the route-planning endpoint.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
