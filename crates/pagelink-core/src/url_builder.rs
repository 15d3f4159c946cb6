//! Building absolute resource URLs against a resolved base.

use crate::address::AddressSource;
use crate::resolver::{self, ResolveError};

/// Joins `base` and `path` with exactly one `/` between them.
///
/// No other normalization happens: no percent-encoding, no query merging.
///
/// # Examples
///
/// - `join("https://h/", "/a")` → `"https://h/a"`
/// - `join("https://h", "a")` → `"https://h/a"`
pub fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let mut out = String::with_capacity(base.len() + 1 + path.len());
    out.push_str(base);
    out.push('/');
    out.push_str(path);
    out
}

/// Builds a URL to a resource served by this process.
pub fn build_url<S: AddressSource + ?Sized>(
    source: &S,
    path: &str,
    predicate: Option<&dyn Fn(&str) -> bool>,
) -> Result<String, ResolveError> {
    let base = resolver::resolve_from(source, predicate)?;
    Ok(join(&base, path))
}
