//! Dependency initialization and wiring for the search demo.

use std::sync::Arc;
use tracing::info;

use crate::config::DemoConfig;
use crate::runner::{DemoRunner, Reporter, StdoutReporter};
use crate::DemoError;
use search_demo_repository::{HttpSearchClient, SearchIndex, SearchProvider};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured runner ready to run.
    pub runner: DemoRunner,
}

impl Dependencies {
    /// Wire the HTTP client, index handle, and runner from configuration,
    /// reporting to stdout.
    pub fn new(config: &DemoConfig) -> Result<Self, DemoError> {
        Self::with_reporter(config, Arc::new(StdoutReporter))
    }

    /// Wire dependencies with a custom reporter.
    pub fn with_reporter(
        config: &DemoConfig,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, DemoError> {
        info!(
            application_id = %config.application_id,
            index = %config.index_name,
            hosts = config.hosts.len(),
            records = config.records.len(),
            "Initializing dependencies"
        );

        let client = build_client(config)?;
        let index = SearchIndex::init(Arc::new(client), config.index_name.clone())?;

        let runner =
            DemoRunner::new(index, reporter).with_wait_for_indexing(config.wait_for_indexing);

        Ok(Self { runner })
    }
}

/// Create the HTTP client and replace its default hosts with the configured list.
pub fn build_client(config: &DemoConfig) -> Result<HttpSearchClient, DemoError> {
    let mut client = HttpSearchClient::new(config.application_id.clone(), config.api_key.clone())
        .map_err(|e| DemoError::config(format!("Failed to create search client: {}", e)))?;

    client.set_hosts(config.hosts.clone());
    info!(hosts = ?client.hosts(), "Search hosts configured");

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_demo_shared::HostDescriptor;

    #[test]
    fn test_build_client_uses_configured_hosts() {
        let config = DemoConfig::default();
        let client = build_client(&config).unwrap();

        assert_eq!(
            client.hosts(),
            vec![
                HostDescriptor::new("http", "localhost:3000", 1),
                HostDescriptor::new("http", "localhost:3000", 2),
            ]
        );
    }

    #[test]
    fn test_empty_host_list_is_kept() {
        let config = DemoConfig {
            hosts: Vec::new(),
            ..DemoConfig::default()
        };
        let client = build_client(&config).unwrap();
        assert!(client.hosts().is_empty());
    }

    #[test]
    fn test_missing_credentials() {
        let config = DemoConfig {
            api_key: String::new(),
            ..DemoConfig::default()
        };
        assert!(matches!(
            Dependencies::new(&config),
            Err(DemoError::ConfigError(_))
        ));
    }

    #[test]
    fn test_empty_index_name() {
        let config = DemoConfig {
            index_name: String::new(),
            ..DemoConfig::default()
        };
        assert!(matches!(
            Dependencies::new(&config),
            Err(DemoError::SearchError(_))
        ));
    }
}
