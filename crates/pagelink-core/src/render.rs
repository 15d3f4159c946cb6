//! Fetching rendered pages from this server.
//!
//! [`PageRenderClient`] turns a path into an absolute URL, attaches an
//! `email-token` header bound to that path, and returns the response body.
//! It does not look at the body.

use std::sync::Mutex;

use thiserror::Error;

use crate::address::{AddressSource, StaticAddresses};
use crate::config::PagelinkConfig;
use crate::resolver::{self, ResolveError};
use crate::token::{EmailToken, TokenDeriver, EMAIL_TOKEN_HEADER};
use crate::transport::{CurlTransport, HttpTransport, TransportError};
use crate::url_builder;

/// Failure of a render request.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// True when `path` starts with `http` in any letter case.
fn is_absolute(path: &str) -> bool {
    path.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("http"))
}

/// Render client over an address source, a token deriver and a transport.
///
/// The transport sits behind a mutex: clearing its default headers, setting
/// the token and issuing the GET happen under one lock, so concurrent renders
/// on a shared client never see each other's token.
pub struct PageRenderClient<S, T> {
    addresses: S,
    deriver: TokenDeriver,
    transport: Mutex<T>,
}

impl PageRenderClient<StaticAddresses, CurlTransport> {
    /// Client over the configured addresses, salt and transport options.
    pub fn from_config(cfg: &PagelinkConfig) -> Self {
        Self::new(
            cfg.address_source(),
            cfg.token_deriver(),
            CurlTransport::new(cfg.transport.clone()),
        )
    }
}

impl<S: AddressSource, T: HttpTransport> PageRenderClient<S, T> {
    pub fn new(addresses: S, deriver: TokenDeriver, transport: T) -> Self {
        Self {
            addresses,
            deriver,
            transport: Mutex::new(transport),
        }
    }

    /// See [`resolver::resolve`].
    pub fn base_url(
        &self,
        predicate: Option<&dyn Fn(&str) -> bool>,
    ) -> Result<String, ResolveError> {
        resolver::resolve_from(&self.addresses, predicate)
    }

    /// See [`resolver::resolve_https`].
    pub fn https_url(&self) -> Result<String, ResolveError> {
        resolver::resolve_https_from(&self.addresses)
    }

    /// Absolute URL for a resource served by this process.
    pub fn build_url(
        &self,
        path: &str,
        predicate: Option<&dyn Fn(&str) -> bool>,
    ) -> Result<String, ResolveError> {
        url_builder::build_url(&self.addresses, path, predicate)
    }

    pub fn email_token(&self, path: &str) -> EmailToken {
        self.deriver.derive(path)
    }

    /// Fetches the rendered page at `path`.
    ///
    /// A `path` starting with `http` is requested verbatim; anything else is
    /// joined onto the resolved base URL. The token is always derived from
    /// `path` as given, not from the final URL.
    pub fn render_page(&self, path: &str) -> Result<String, RenderError> {
        let url = if is_absolute(path) {
            path.to_string()
        } else {
            self.build_url(path, None)?
        };

        tracing::debug!(%url, "render_page");

        let token = self.email_token(path);
        let mut transport = self
            .transport
            .lock()
            .map_err(|_| TransportError::Poisoned)?;
        let headers = transport.default_headers();
        headers.clear();
        headers.append(EMAIL_TOKEN_HEADER, token.into_string());

        Ok(transport.get_string(&url)?)
    }

    pub fn into_transport(self) -> Result<T, TransportError> {
        self.transport.into_inner().map_err(|_| TransportError::Poisoned)
    }
}
