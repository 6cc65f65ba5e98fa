//! OpenRouteService client error types.

use crate::domain::InvalidCoordinate;

/// Errors from the OpenRouteService HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OrsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check ORS_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by OpenRouteService")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Directions response contained no route
    #[error("no route in directions response")]
    NoRoute,

    /// Response contained a position outside WGS84 bounds
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),
}
