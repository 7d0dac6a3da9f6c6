//! Transport settings for the HTTP client.

use std::time::Duration;

/// Timeouts applied to every request.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Time allowed to establish a connection to one host.
    pub connect_timeout: Duration,
    /// Time allowed for a whole request against one host.
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
