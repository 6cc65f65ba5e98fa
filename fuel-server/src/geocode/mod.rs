//! Free-text address resolution.
//!
//! The [`Resolver`] memoizes a [`Geocoder`] behind a bounded cache and
//! resolves address pairs concurrently on a small worker pool.

mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::{AddressPair, Geocoder, Resolver, ResolverConfig};
