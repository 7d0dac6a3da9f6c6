//! Runner for the demo: write the sample records, then search.
//!
//! The write is awaited before the search is issued so the search can see
//! the records it is meant to find. A failed write is reported and the
//! search still runs.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use search_demo_repository::{SearchError, SearchIndex};
use search_demo_shared::{ObjectId, Record, SaveObjectsResponse, SearchResponse};
use serde::Serialize;
use serde_json::Value;

/// Sink for the demo's human-readable output.
pub trait Reporter: Send + Sync {
    fn report(&self, output: &str);
}

/// Prints each report to stdout.
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&self, output: &str) {
        println!("{}", output);
    }
}

/// Outcome of both operations of one run.
#[derive(Debug)]
pub struct RunSummary {
    pub write: Result<SaveObjectsResponse, SearchError>,
    pub search: Result<SearchResponse, SearchError>,
}

impl RunSummary {
    /// Both operations succeeded.
    pub fn is_success(&self) -> bool {
        self.write.is_ok() && self.search.is_ok()
    }
}

/// Issues the write and the search against one index and reports each outcome once.
pub struct DemoRunner {
    index: SearchIndex,
    reporter: Arc<dyn Reporter>,
    wait_for_indexing: bool,
}

impl DemoRunner {
    pub fn new(index: SearchIndex, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            index,
            reporter,
            wait_for_indexing: false,
        }
    }

    /// Also wait for the service's indexing task before searching.
    pub fn with_wait_for_indexing(mut self, wait: bool) -> Self {
        self.wait_for_indexing = wait;
        self
    }

    /// Write `records`, then search for `query`.
    ///
    /// Neither failure aborts the run; each is reported and recorded in the summary.
    #[instrument(skip(self, records), fields(index = %self.index.name(), records = records.len()))]
    pub async fn run(&self, records: &[Record], query: &str) -> RunSummary {
        let write = self.write(records).await;
        let search = self.search(query).await;

        info!(
            write_ok = write.is_ok(),
            search_ok = search.is_ok(),
            "Run finished"
        );
        RunSummary { write, search }
    }

    async fn write(&self, records: &[Record]) -> Result<SaveObjectsResponse, SearchError> {
        let result = match self.index.save_objects(records).await {
            Ok(response) if self.wait_for_indexing => self.wait_for(response).await,
            other => other,
        };

        match &result {
            Ok(response) => self.reporter.report(&ids_json(&response.object_ids)),
            Err(e) => {
                warn!(error = %e, "Write failed");
                self.reporter.report(&e.to_json_pretty());
            }
        }
        result
    }

    async fn wait_for(
        &self,
        response: SaveObjectsResponse,
    ) -> Result<SaveObjectsResponse, SearchError> {
        match response.task_id {
            Some(task_id) => {
                self.index.wait_task(task_id).await?;
                Ok(response)
            }
            None => {
                warn!("No task id in write response, searching without waiting");
                Ok(response)
            }
        }
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let result = self.index.search(query).await.and_then(|response| {
            let hits = pretty_json(&response.hits)?;
            Ok((response, hits))
        });

        match result {
            Ok((response, hits)) => {
                self.reporter.report(&hits);
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "Search failed");
                self.reporter.report(&e.to_json_pretty());
                Err(e)
            }
        }
    }
}

fn pretty_json<T: Serialize>(value: &T) -> Result<String, SearchError> {
    serde_json::to_string_pretty(value).map_err(|e| SearchError::serialization(e.to_string()))
}

/// Render identifiers as a JSON array, keeping numbers as numbers.
fn ids_json(ids: &[ObjectId]) -> String {
    let values: Vec<Value> = ids
        .iter()
        .map(|id| match id {
            ObjectId::Number(n) => Value::from(*n),
            ObjectId::Text(s) => Value::from(s.as_str()),
        })
        .collect();
    Value::Array(values).to_string()
}
