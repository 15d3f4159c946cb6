//! Default-port normalization.

use url::Url;

use super::ResolveError;

/// Rewrites `address` without its port when the effective port equals `port`.
///
/// The effective port is the explicit one or, if absent, the scheme's known
/// default, so `https://host/p` counts as port 443. A rewritten address is
/// rebuilt from scheme, host, path and query (userinfo and fragment are
/// dropped) and re-serialized, so an empty path comes back as `/`. Any other
/// address is returned as given.
pub fn remove_port(address: &str, port: u16) -> Result<String, ResolveError> {
    let parsed = Url::parse(address).map_err(|e| ResolveError::invalid(address, e))?;
    if parsed.port_or_known_default() != Some(port) {
        return Ok(address.to_string());
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| ResolveError::invalid(address, url::ParseError::EmptyHost))?;
    let mut rebuilt = format!("{}://{}{}", parsed.scheme(), host, parsed.path());
    if let Some(query) = parsed.query() {
        rebuilt.push('?');
        rebuilt.push_str(query);
    }

    let reparsed = Url::parse(&rebuilt).map_err(|e| ResolveError::invalid(address, e))?;
    Ok(reparsed.to_string())
}
