//! HTTP implementation of the search provider.
//!
//! This module provides a concrete implementation of `SearchProvider`
//! speaking the hosted search service's REST API.

mod client;
mod requests;
mod transport_config;

pub use client::HttpSearchClient;
pub use transport_config::TransportConfig;
