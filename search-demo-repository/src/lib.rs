//! # Search Demo Repository
//!
//! This crate provides the client boundary for the hosted search service:
//! the `SearchProvider` trait, the `SearchIndex` handle bound to one index,
//! the error type, and a concrete implementation over the service's HTTP API.

pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod interfaces;

pub use client::SearchIndex;
pub use config::SearchIndexConfig;
pub use errors::SearchError;
pub use http::{HttpSearchClient, TransportConfig};
pub use interfaces::SearchProvider;
