//! HTTP transport used to fetch rendered pages.
//!
//! The render client only depends on the [`HttpTransport`] trait. The
//! production implementation is [`CurlTransport`] on libcurl.

mod curl_transport;
mod headers;

pub use curl_transport::CurlTransport;
pub use headers::HeaderSet;

use thiserror::Error;

/// Network or HTTP-level failure. Never retried by this crate.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (invalid URL, connection, timeout, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// The response had a non-2xx status.
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },
    /// A previous request panicked while holding the transport.
    #[error("transport lock poisoned")]
    Poisoned,
}

/// Issues GET requests carrying a mutable set of default headers.
///
/// Default headers persist across calls on the same transport; callers
/// reset them before each request.
pub trait HttpTransport {
    fn default_headers(&mut self) -> &mut HeaderSet;

    /// GETs `url` with the current default headers and returns the body.
    fn get_string(&mut self, url: &str) -> Result<String, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn default_headers(&mut self) -> &mut HeaderSet {
        (**self).default_headers()
    }

    fn get_string(&mut self, url: &str) -> Result<String, TransportError> {
        (**self).get_string(url)
    }
}
