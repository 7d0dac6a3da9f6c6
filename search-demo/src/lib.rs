//! # Search Demo
//!
//! Setup-and-demo program for the hosted search service.
//!
//! ## Flow
//!
//! 1. **Config**: Credentials, hosts, records, and query from defaults, a JSON file, and the environment
//! 2. **Dependencies**: An HTTP client with the configured hosts and a handle to the configured index
//! 3. **Runner**: Write the records, wait for the write to settle, then search and report both outcomes

pub mod config;
pub mod runner;

pub use config::{DemoConfig, Dependencies};
pub use runner::{DemoRunner, Reporter, RunSummary, StdoutReporter};

use thiserror::Error;

/// Errors that can occur while preparing the demo.
///
/// Failures of the write or the search themselves are reported, not returned.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search client error.
    #[error("Search error: {0}")]
    SearchError(#[from] search_demo_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DemoError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
