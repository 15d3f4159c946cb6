//! Base URL resolution.
//!
//! Picks one canonical base URL out of the addresses a server is bound to.
//! Candidates are filtered by plain string prefix; only the selected address
//! is parsed, so malformed entries that are never selected cannot fail a
//! resolution.

mod error;
mod port;

pub use error::ResolveError;
pub use port::remove_port;

use crate::address::AddressSource;

/// Port rewritten away from resolved addresses.
pub const DEFAULT_HTTPS_PORT: u16 = 443;

fn is_https(address: &str) -> bool {
    address.starts_with("https://")
}

fn is_http(address: &str) -> bool {
    address.starts_with("http://")
}

/// Resolves a base URL from `addresses`.
///
/// Precedence, first hit wins:
/// 1. the first address matching `predicate`, if one was given;
/// 2. the first `https://` address;
/// 3. the first `http://` address.
///
/// The winner is normalized with [`remove_port`] for port 443 whichever rule
/// selected it.
pub fn resolve(
    addresses: &[String],
    predicate: Option<&dyn Fn(&str) -> bool>,
) -> Result<String, ResolveError> {
    let by_predicate = predicate.and_then(|p| addresses.iter().find(|a| p(a.as_str())));
    let selected = by_predicate
        .or_else(|| addresses.iter().find(|a| is_https(a.as_str())))
        .or_else(|| addresses.iter().find(|a| is_http(a.as_str())))
        .ok_or(ResolveError::NoAddressAvailable)?;

    tracing::trace!(candidates = addresses.len(), %selected, "selected base address");
    remove_port(selected, DEFAULT_HTTPS_PORT)
}

/// Resolves the first `https://` address, with no fallback to plain http.
pub fn resolve_https(addresses: &[String]) -> Result<String, ResolveError> {
    let selected = addresses
        .iter()
        .find(|a| is_https(a.as_str()))
        .ok_or(ResolveError::NoAddressAvailable)?;
    remove_port(selected, DEFAULT_HTTPS_PORT)
}

/// [`resolve`] over the current addresses of `source`.
pub fn resolve_from<S: AddressSource + ?Sized>(
    source: &S,
    predicate: Option<&dyn Fn(&str) -> bool>,
) -> Result<String, ResolveError> {
    resolve(&source.addresses(), predicate)
}

/// [`resolve_https`] over the current addresses of `source`.
pub fn resolve_https_from<S: AddressSource + ?Sized>(source: &S) -> Result<String, ResolveError> {
    resolve_https(&source.addresses())
}
