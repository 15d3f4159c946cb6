//! Address sources: where the set of bound server addresses comes from.
//!
//! The resolver only depends on the [`AddressSource`] trait and does not know
//! whether the addresses came from config, CLI flags, or live listeners.

use std::net::SocketAddr;
use std::sync::Arc;

/// Supplies the ordered set of URLs the process is reachable at.
///
/// Order is significant: resolution picks the first match.
pub trait AddressSource {
    fn addresses(&self) -> Vec<String>;
}

impl<T: AddressSource + ?Sized> AddressSource for &T {
    fn addresses(&self) -> Vec<String> {
        (**self).addresses()
    }
}

impl<T: AddressSource + ?Sized> AddressSource for Arc<T> {
    fn addresses(&self) -> Vec<String> {
        (**self).addresses()
    }
}

/// A fixed list of addresses (e.g. from `config.toml` or `--address` flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticAddresses(pub Vec<String>);

impl StaticAddresses {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(addresses.into_iter().map(Into::into).collect())
    }
}

impl AddressSource for StaticAddresses {
    fn addresses(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Addresses of locally bound listeners, each tagged with the scheme it serves.
#[derive(Debug, Clone, Default)]
pub struct ListenerAddresses {
    bound: Vec<(&'static str, SocketAddr)>,
}

impl ListenerAddresses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plain-HTTP listener.
    pub fn http(mut self, addr: SocketAddr) -> Self {
        self.bound.push(("http", addr));
        self
    }

    /// Registers a TLS listener.
    pub fn https(mut self, addr: SocketAddr) -> Self {
        self.bound.push(("https", addr));
        self
    }
}

impl AddressSource for ListenerAddresses {
    fn addresses(&self) -> Vec<String> {
        // SocketAddr's Display already brackets IPv6 hosts.
        self.bound
            .iter()
            .map(|(scheme, addr)| format!("{}://{}", scheme, addr))
            .collect()
    }
}
