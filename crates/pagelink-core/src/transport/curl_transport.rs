//! libcurl-backed transport.

use std::time::Duration;

use super::{HeaderSet, HttpTransport, TransportError};
use crate::config::TransportConfig;

/// Reuses one curl easy handle (and its connection cache) across requests.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub struct CurlTransport {
    easy: curl::easy::Easy,
    headers: HeaderSet,
    options: TransportConfig,
}

impl CurlTransport {
    pub fn new(options: TransportConfig) -> Self {
        Self {
            easy: curl::easy::Easy::new(),
            headers: HeaderSet::new(),
            options,
        }
    }

    fn configure(&mut self, url: &str) -> Result<(), curl::Error> {
        // Drop options left over from the previous request, keep connections.
        self.easy.reset();
        self.easy.url(url)?;
        self.easy.get(true)?;
        self.easy.follow_location(self.options.follow_redirects)?;
        self.easy.max_redirections(10)?;
        self.easy
            .connect_timeout(Duration::from_secs(self.options.connect_timeout_secs))?;
        self.easy
            .timeout(Duration::from_secs(self.options.timeout_secs))?;

        // Build curl list for default headers (e.g. "Name: value").
        let mut list = curl::easy::List::new();
        for (k, v) in self.headers.iter() {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        self.easy.http_headers(list)?;
        Ok(())
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl std::fmt::Debug for CurlTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurlTransport")
            .field("headers", &self.headers)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl HttpTransport for CurlTransport {
    fn default_headers(&mut self) -> &mut HeaderSet {
        &mut self.headers
    }

    fn get_string(&mut self, url: &str) -> Result<String, TransportError> {
        self.configure(url)?;

        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = self.easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Status {
                url: url.to_string(),
                code,
            });
        }

        tracing::trace!(url, bytes = body.len(), "GET complete");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
