//! Resolution error type.

use thiserror::Error;

/// Failure to pick or normalize a base URL.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No address matched the predicate or the required scheme.
    #[error("no address available")]
    NoAddressAvailable,
    /// The selected address could not be parsed during port normalization.
    /// A URL that parses but has no host reports `ParseError::EmptyHost`.
    #[error("invalid address format: {address}")]
    InvalidAddressFormat {
        address: String,
        #[source]
        source: url::ParseError,
    },
}

impl ResolveError {
    pub(crate) fn invalid(address: &str, source: url::ParseError) -> Self {
        ResolveError::InvalidAddressFormat {
            address: address.to_string(),
            source,
        }
    }
}
