//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;
use crate::plan::{Endpoint, PlanRequest};

/// Message returned when either endpoint is missing.
pub const MISSING_ENDPOINTS: &str = "Both 'start' and 'end' addresses are required";

/// Request to plan fuel stops along a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Start address or `[lat, lon]` pair.
    #[serde(default)]
    pub start: Option<EndpointDto>,

    /// End address or `[lat, lon]` pair.
    #[serde(default)]
    pub end: Option<EndpointDto>,

    /// Optional POI category filter (server default when absent).
    #[serde(default)]
    pub category: Option<String>,
}

/// A trip endpoint as sent by clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EndpointDto {
    Address(String),
    LatLon([f64; 2]),
}

impl EndpointDto {
    fn into_endpoint(self) -> Result<Option<Endpoint>, String> {
        match self {
            EndpointDto::Address(a) if a.trim().is_empty() => Ok(None),
            EndpointDto::Address(a) => Ok(Some(Endpoint::Address(a))),
            EndpointDto::LatLon([lat, lon]) => Coordinate::new(lat, lon)
                .map(|c| Some(Endpoint::Coordinate(c)))
                .map_err(|e| e.to_string()),
        }
    }
}

impl RouteRequest {
    /// Convert to a plan request, rejecting missing or blank endpoints.
    pub fn into_plan_request(self) -> Result<PlanRequest, String> {
        let start = self.start.map(EndpointDto::into_endpoint).transpose()?.flatten();
        let end = self.end.map(EndpointDto::into_endpoint).transpose()?.flatten();

        let (Some(start), Some(end)) = (start, end) else {
            return Err(MISSING_ENDPOINTS.to_string());
        };

        let mut request = PlanRequest::new(start, end);
        if let Some(category) = self.category.filter(|c| !c.trim().is_empty()) {
            request = request.with_category(category);
        }
        Ok(request)
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Always `false`.
    pub status: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
