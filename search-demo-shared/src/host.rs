//! Host descriptors used by the transport layer to route requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accept tag bit for read calls (search, task status).
pub const ACCEPT_READ: u8 = 1;

/// Accept tag bit for write calls (batch writes).
pub const ACCEPT_WRITE: u8 = 2;

/// Accept tag for hosts that serve both reads and writes.
pub const ACCEPT_ANY: u8 = ACCEPT_READ | ACCEPT_WRITE;

/// The kind of call being routed, matched against a host's accept tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Read,
    Write,
}

impl CallKind {
    fn mask(self) -> u8 {
        match self {
            CallKind::Read => ACCEPT_READ,
            CallKind::Write => ACCEPT_WRITE,
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKind::Read => write!(f, "read"),
            CallKind::Write => write!(f, "write"),
        }
    }
}

/// A routing entry telling the transport which endpoint to try.
///
/// `url` is a bare `host:port` authority; `protocol` is prepended when the
/// request URL is built. `accept` is a bit set of [`ACCEPT_READ`] and
/// [`ACCEPT_WRITE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDescriptor {
    pub protocol: String,
    pub url: String,
    #[serde(alias = "acceptTag")]
    pub accept: u8,
}

impl HostDescriptor {
    /// Create a host descriptor.
    pub fn new(protocol: impl Into<String>, url: impl Into<String>, accept: u8) -> Self {
        Self {
            protocol: protocol.into(),
            url: url.into(),
            accept,
        }
    }

    /// `https` host serving both reads and writes.
    pub fn https(url: impl Into<String>) -> Self {
        Self::new("https", url, ACCEPT_ANY)
    }

    /// Render `protocol://url`.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol, self.url)
    }

    /// Whether this host is eligible for the given kind of call.
    pub fn accepts(&self, kind: CallKind) -> bool {
        self.accept & kind.mask() != 0
    }
}

impl fmt::Display for HostDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (accept={})", self.base_url(), self.accept)
    }
}
