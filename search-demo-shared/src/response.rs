//! Decoded responses from the search service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ObjectId, Record};

/// Outcome of a batch write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveObjectsResponse {
    /// Identifiers assigned to (or echoed for) each submitted record, in order.
    #[serde(rename = "objectIDs")]
    pub object_ids: Vec<ObjectId>,
    /// Task tracking the asynchronous indexing job, when the service reports one.
    #[serde(rename = "taskID", default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SaveObjectsResponse {
    /// Response for a batch that needed no request.
    pub fn empty() -> Self {
        Self {
            object_ids: Vec::new(),
            task_id: None,
            updated_at: None,
        }
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Matching records, ordered by the service's relevance ranking.
    pub hits: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_hits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(
        rename = "processingTimeMS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub processing_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl SearchResponse {
    /// Response with the given hits and no metadata.
    pub fn with_hits(hits: Vec<Record>) -> Self {
        Self {
            hits,
            nb_hits: None,
            page: None,
            processing_time_ms: None,
            query: None,
        }
    }
}

/// Indexing task state as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Published,
    NotPublished,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_response_fields() {
        let response: SaveObjectsResponse = serde_json::from_value(json!({
            "objectIDs": [1, "two"],
            "taskID": 1,
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(
            response.object_ids,
            vec![ObjectId::from(1), ObjectId::from("two")]
        );
        assert_eq!(response.task_id, Some(1));
        assert!(response.updated_at.is_some());
    }

    #[test]
    fn test_search_response_minimal() {
        let response: SearchResponse = serde_json::from_value(json!({
            "hits": [{"objectID": 1, "title": "El foo de la fuera"}]
        }))
        .unwrap();

        assert_eq!(response.hits.len(), 1);
        assert!(response.nb_hits.is_none());
    }

    #[test]
    fn test_task_status() {
        let status: TaskStatus = serde_json::from_value(json!("notPublished")).unwrap();
        assert_eq!(status, TaskStatus::NotPublished);
    }
}
