//! Demo configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::DemoError;
use search_demo_shared::{HostDescriptor, Record};

/// Path of a JSON configuration file replacing the built-in defaults.
pub const CONFIG_PATH_VAR: &str = "SEARCH_DEMO_CONFIG";
pub const APPLICATION_ID_VAR: &str = "SEARCH_APPLICATION_ID";
pub const API_KEY_VAR: &str = "SEARCH_API_KEY";
pub const INDEX_VAR: &str = "SEARCH_INDEX";
pub const QUERY_VAR: &str = "SEARCH_QUERY";
pub const WAIT_FOR_INDEXING_VAR: &str = "SEARCH_WAIT_FOR_INDEXING";

const DEFAULT_APPLICATION_ID: &str = "applicationId";
const DEFAULT_API_KEY: &str = "apiKey";
const DEFAULT_INDEX: &str = "poemas";
const DEFAULT_QUERY: &str = "fuera";

/// Everything the demo needs: credentials, routing, sample data, and the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoConfig {
    pub application_id: String,
    pub api_key: String,
    pub index_name: String,
    pub hosts: Vec<HostDescriptor>,
    pub records: Vec<Record>,
    pub query: String,
    /// Poll the indexing task before searching. The self-hosted server has no task endpoint.
    pub wait_for_indexing: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            application_id: DEFAULT_APPLICATION_ID.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            index_name: DEFAULT_INDEX.to_string(),
            hosts: vec![
                HostDescriptor::new("http", "localhost:3000", 1),
                HostDescriptor::new("http", "localhost:3000", 2),
            ],
            records: vec![Record::new(1)
                .with_field("title", "El foo de la fuera")
                .with_field("body", "El fuero de la fuera fueron fuerar con pontito...")],
            query: DEFAULT_QUERY.to_string(),
            wait_for_indexing: false,
        }
    }
}

impl DemoConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_DEMO_CONFIG`: JSON file replacing the defaults (fields it omits keep their defaults)
    /// - `SEARCH_APPLICATION_ID`: application identifier (default: applicationId)
    /// - `SEARCH_API_KEY`: API key (default: apiKey)
    /// - `SEARCH_INDEX`: index name (default: poemas)
    /// - `SEARCH_QUERY`: query text (default: fuera)
    /// - `SEARCH_WAIT_FOR_INDEXING`: `true`/`false` (default: false)
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DemoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(application_id) = lookup(APPLICATION_ID_VAR) {
            config.application_id = application_id;
        }
        if let Some(api_key) = lookup(API_KEY_VAR) {
            config.api_key = api_key;
        }
        if let Some(index_name) = lookup(INDEX_VAR) {
            config.index_name = index_name;
        }
        if let Some(query) = lookup(QUERY_VAR) {
            config.query = query;
        }
        if let Some(wait) = lookup(WAIT_FOR_INDEXING_VAR) {
            config.wait_for_indexing = parse_flag(WAIT_FOR_INDEXING_VAR, &wait)?;
        }

        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, DemoError> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            DemoError::config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, DemoError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(DemoError::config(format!(
            "{} must be true or false, got {:?}",
            name, other
        ))),
    }
}
