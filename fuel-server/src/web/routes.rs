//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::PlanResult;
use crate::gateway::RoutingProvider;
use crate::geocode::Geocoder;
use crate::plan::PlanError;

use super::dto::{ErrorResponse, RouteRequest};
use super::state::AppState;

/// Message returned for every internal failure.
const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Create the application router.
pub fn create_router<G: Geocoder, P: RoutingProvider>(state: AppState<G, P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/route", post(plan_route::<G, P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan fuel stops between two endpoints.
async fn plan_route<G: Geocoder, P: RoutingProvider>(
    State(state): State<AppState<G, P>>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<Arc<PlanResult>>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let request = req
        .into_plan_request()
        .map_err(|message| AppError::BadRequest { message })?;

    let result = state.planner.plan(request).await?;
    Ok(Json(result))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { details: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidInput(message) => AppError::BadRequest { message },
            PlanError::NoPois => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                details: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, error_body(message, None))
            }
            AppError::NotFound { message } => {
                warn!(%message, "not found");
                (StatusCode::NOT_FOUND, error_body(message, None))
            }
            AppError::Internal { details } => {
                error!(%details, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body(UNKNOWN_ERROR.to_string(), Some(details)),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn error_body(error: String, details: Option<String>) -> ErrorResponse {
    ErrorResponse {
        error,
        status: false,
        details,
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
