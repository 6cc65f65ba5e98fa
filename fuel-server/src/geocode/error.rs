//! Address resolution error types.

/// Errors from resolving a free-text address.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The geocoder found no match; planning cannot proceed without coordinates.
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// The geocoder could not be reached or returned garbage.
    #[error("geocoder error for {address:?}: {message}")]
    Geocoder { address: String, message: String },

    /// A lookup task was cancelled or panicked.
    #[error("resolver worker failed: {0}")]
    Worker(String),
}
