//! Configuration types for the SearchIndex handle.

use std::time::Duration;

/// Configuration for the SearchIndex handle.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Maximum number of records allowed in a single batch write.
    /// Set to None to disable the limit.
    pub max_batch_size: Option<usize>,
    /// Assign a random objectID to records that lack one instead of rejecting the batch.
    pub auto_generate_object_ids: bool,
    /// Delay between task status polls in `wait_task`.
    pub task_poll_interval: Duration,
    /// Number of task status polls before `wait_task` gives up.
    pub max_task_polls: u32,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(1000),
            auto_generate_object_ids: false,
            task_poll_interval: Duration::from_millis(100),
            max_task_polls: 50,
        }
    }
}

impl SearchIndexConfig {
    /// Create a config with no batch size limit.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
            ..Self::default()
        }
    }

    /// Create a config with a custom batch size limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
            ..Self::default()
        }
    }

    /// Enable objectID generation for records submitted without one.
    pub fn auto_generate_object_ids(mut self) -> Self {
        self.auto_generate_object_ids = true;
        self
    }

    /// Override the task polling schedule.
    pub fn with_task_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.task_poll_interval = interval;
        self.max_task_polls = max_polls;
        self
    }
}
