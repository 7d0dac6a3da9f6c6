//! Index handle implementation.
//!
//! `SearchIndex` binds one index name to an injected provider. Application
//! code uses it to write records and run searches against that index.

use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::SearchIndexConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchProvider;
use search_demo_shared::{
    ObjectId, Record, SaveObjectsResponse, SearchParams, SearchResponse, TaskStatus,
};

/// A handle to one named index.
///
/// The handle owns no index state; everything is delegated to the provider.
#[derive(Clone)]
pub struct SearchIndex {
    provider: Arc<dyn SearchProvider>,
    name: String,
    config: SearchIndexConfig,
}

impl SearchIndex {
    /// Open a handle to `name` with default configuration.
    pub fn init(
        provider: Arc<dyn SearchProvider>,
        name: impl Into<String>,
    ) -> Result<Self, SearchError> {
        Self::with_config(provider, name, SearchIndexConfig::default())
    }

    /// Open a handle to `name` with custom configuration.
    pub fn with_config(
        provider: Arc<dyn SearchProvider>,
        name: impl Into<String>,
        config: SearchIndexConfig,
    ) -> Result<Self, SearchError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SearchError::validation("index name is required"));
        }

        Ok(Self {
            provider,
            name,
            config,
        })
    }

    /// The index name this handle is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Make sure every record carries an objectID, generating them if configured to.
    fn prepare_records(&self, records: &[Record]) -> Result<Vec<Record>, SearchError> {
        records
            .iter()
            .enumerate()
            .map(|(position, record)| match record.object_id {
                Some(_) => Ok(record.clone()),
                None if self.config.auto_generate_object_ids => {
                    let mut record = record.clone();
                    record.object_id = Some(ObjectId::Text(Uuid::new_v4().to_string()));
                    Ok(record)
                }
                None => Err(SearchError::validation(format!(
                    "record at position {} has no objectID",
                    position
                ))),
            })
            .collect()
    }

    /// Submit records for upsert.
    ///
    /// The batch size is limited by the configured max_batch_size (default: 1000).
    /// An empty batch succeeds without issuing a request.
    #[instrument(skip(self, records), fields(index = %self.name, count = records.len()))]
    pub async fn save_objects(&self, records: &[Record]) -> Result<SaveObjectsResponse, SearchError> {
        if records.is_empty() {
            return Ok(SaveObjectsResponse::empty());
        }

        self.validate_batch_size(records.len())?;
        let records = self.prepare_records(records)?;

        let response = self.provider.save_objects(&self.name, &records).await?;
        info!(
            object_ids = response.object_ids.len(),
            task_id = ?response.task_id,
            "Records saved"
        );
        Ok(response)
    }

    /// Submit a single record for upsert.
    pub async fn save_object(&self, record: Record) -> Result<SaveObjectsResponse, SearchError> {
        self.save_objects(std::slice::from_ref(&record)).await
    }

    /// Search the index for a plain query string.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        self.search_with_params(&SearchParams::new(query)).await
    }

    /// Search the index with explicit parameters.
    #[instrument(skip(self, params), fields(index = %self.name, query = %params.query))]
    pub async fn search_with_params(
        &self,
        params: &SearchParams,
    ) -> Result<SearchResponse, SearchError> {
        let response = self.provider.search(&self.name, params).await?;
        debug!(hits = response.hits.len(), "Search completed");
        Ok(response)
    }

    /// Poll until the indexing task is published.
    ///
    /// Gives up with `SearchError::TaskTimeout` after `max_task_polls` polls.
    #[instrument(skip(self), fields(index = %self.name))]
    pub async fn wait_task(&self, task_id: i64) -> Result<(), SearchError> {
        for attempt in 1..=self.config.max_task_polls {
            match self.provider.task_status(&self.name, task_id).await? {
                TaskStatus::Published => {
                    debug!(attempt, "Task published");
                    return Ok(());
                }
                TaskStatus::NotPublished if attempt < self.config.max_task_polls => {
                    tokio::time::sleep(self.config.task_poll_interval).await;
                }
                TaskStatus::NotPublished => {}
            }
        }

        Err(SearchError::task_timeout(task_id, self.config.max_task_polls))
    }
}
