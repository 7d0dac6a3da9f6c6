//! Search provider trait definition.
//!
//! This module defines the capability the demo needs from a search service
//! client: a replaceable host list, a batch write, a search, and a task
//! status lookup.

use async_trait::async_trait;

use crate::errors::SearchError;
use search_demo_shared::{
    HostDescriptor, Record, SaveObjectsResponse, SearchParams, SearchResponse, TaskStatus,
};

/// Abstracts the client library that talks to the search service.
///
/// Implementations are injected into `SearchIndex` so the demo can run
/// against the HTTP client in production and against mocks in tests. All
/// network, routing, and ranking behavior lives behind this trait.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// The current routing list, in the order hosts are tried.
    fn hosts(&self) -> Vec<HostDescriptor>;

    /// Replace the routing list wholesale.
    ///
    /// Order is preserved; no deduplication and no reachability check is
    /// performed.
    fn set_hosts(&mut self, hosts: Vec<HostDescriptor>);

    /// Submit records for upsert into the named index.
    ///
    /// # Returns
    ///
    /// * `Ok(SaveObjectsResponse)` - identifiers in submission order
    /// * `Err(SearchError)` - if the write could not be delivered or was rejected
    async fn save_objects(
        &self,
        index_name: &str,
        records: &[Record],
    ) -> Result<SaveObjectsResponse, SearchError>;

    /// Run a search against the named index.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - hits in the service's relevance order
    /// * `Err(SearchError)` - if the search could not be delivered or was rejected
    async fn search(
        &self,
        index_name: &str,
        params: &SearchParams,
    ) -> Result<SearchResponse, SearchError>;

    /// Look up the state of an indexing task.
    async fn task_status(&self, index_name: &str, task_id: i64) -> Result<TaskStatus, SearchError>;
}
