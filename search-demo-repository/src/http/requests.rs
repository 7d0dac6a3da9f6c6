//! Request builders and response decoders for the REST API.
//!
//! Decoding is lenient about a few shapes the self-hosted compatible server
//! produces: `hits` encoded as a JSON string, result-set rows with every
//! column as text, and `objectIDs` that are null, missing, or too short.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::errors::SearchError;
use search_demo_shared::{
    HostDescriptor, ObjectId, Record, SaveObjectsResponse, SearchParams, SearchResponse,
    TaskStatus,
};

pub const APPLICATION_ID_HEADER: &str = "X-Algolia-Application-Id";
pub const API_KEY_HEADER: &str = "X-Algolia-API-Key";

/// Batch action used for upserts.
const UPDATE_OBJECT_ACTION: &str = "updateObject";

/// How many times a string-encoded `hits` payload is unwrapped.
const MAX_HIT_DECODE_DEPTH: usize = 2;

#[derive(Serialize)]
struct BatchRequest<'a> {
    requests: Vec<BatchOperation<'a>>,
}

#[derive(Serialize)]
struct BatchOperation<'a> {
    action: &'static str,
    body: &'a Record,
}

#[derive(Deserialize)]
struct RawSaveResponse {
    #[serde(rename = "objectIDs", default)]
    object_ids: Option<Vec<Option<ObjectId>>>,
    #[serde(rename = "taskID", default)]
    task_id: Option<i64>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchResponse {
    #[serde(default)]
    hits: Value,
    #[serde(default)]
    nb_hits: Option<u64>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(rename = "processingTimeMS", default)]
    processing_time_ms: Option<u64>,
    #[serde(default)]
    query: Option<String>,
}

#[derive(Deserialize)]
struct RawTaskResponse {
    status: TaskStatus,
}

/// Build the URL of an API path on the given host.
pub fn endpoint(host: &HostDescriptor, segments: &[&str]) -> Result<Url, SearchError> {
    let mut url = Url::parse(&host.base_url())
        .map_err(|e| SearchError::connection(format!("invalid host {}: {}", host, e)))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| SearchError::connection(format!("invalid host {}: not a base URL", host)))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

pub fn batch_path(index_name: &str) -> [&str; 4] {
    ["1", "indexes", index_name, "batch"]
}

pub fn query_path(index_name: &str) -> [&str; 4] {
    ["1", "indexes", index_name, "query"]
}

pub fn task_path<'a>(index_name: &'a str, task_id: &'a str) -> [&'a str; 5] {
    ["1", "indexes", index_name, "task", task_id]
}

/// Serialize records as a batch of upserts.
pub fn batch_body(records: &[Record]) -> Result<Vec<u8>, SearchError> {
    let request = BatchRequest {
        requests: records
            .iter()
            .map(|body| BatchOperation {
                action: UPDATE_OBJECT_ACTION,
                body,
            })
            .collect(),
    };
    serde_json::to_vec(&request).map_err(|e| SearchError::serialization(e.to_string()))
}

pub fn query_body(params: &SearchParams) -> Result<Vec<u8>, SearchError> {
    serde_json::to_vec(params).map_err(|e| SearchError::serialization(e.to_string()))
}

/// Extract a readable message from an error response body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => body.to_string(),
        },
        _ => body.to_string(),
    }
}

/// Decode a batch response, filling absent identifiers from the submitted records.
pub fn parse_save_response(
    body: Value,
    submitted: &[Record],
) -> Result<SaveObjectsResponse, SearchError> {
    let raw: RawSaveResponse =
        serde_json::from_value(body).map_err(|e| SearchError::parse(e.to_string()))?;

    let returned = raw.object_ids.unwrap_or_default();

    // One id per submitted record, whatever length the server echoed.
    let count = if submitted.is_empty() {
        returned.len()
    } else {
        submitted.len()
    };

    let object_ids = (0..count)
        .map(|position| {
            returned
                .get(position)
                .cloned()
                .flatten()
                .or_else(|| submitted.get(position).and_then(|r| r.object_id.clone()))
                .ok_or_else(|| {
                    SearchError::parse(format!("no objectID for record at position {}", position))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SaveObjectsResponse {
        object_ids,
        task_id: raw.task_id,
        updated_at: raw.updated_at,
    })
}

pub fn parse_search_response(body: Value) -> Result<SearchResponse, SearchError> {
    let raw: RawSearchResponse =
        serde_json::from_value(body).map_err(|e| SearchError::parse(e.to_string()))?;

    Ok(SearchResponse {
        hits: decode_hits(raw.hits, 0)?,
        nb_hits: raw.nb_hits,
        page: raw.page,
        processing_time_ms: raw.processing_time_ms,
        query: raw.query,
    })
}

pub fn parse_task_response(body: Value) -> Result<TaskStatus, SearchError> {
    let raw: RawTaskResponse =
        serde_json::from_value(body).map_err(|e| SearchError::parse(e.to_string()))?;
    Ok(raw.status)
}

fn decode_hits(hits: Value, depth: usize) -> Result<Vec<Record>, SearchError> {
    match hits {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => {
            serde_json::from_value(hits).map_err(|e| SearchError::parse(e.to_string()))
        }
        Value::String(encoded) if depth < MAX_HIT_DECODE_DEPTH => {
            let inner: Value = serde_json::from_str(&encoded)
                .map_err(|e| SearchError::parse(format!("hits is not JSON: {}", e)))?;
            decode_hits(inner, depth + 1)
        }
        // Single-row result set: {"count": n, "rows": {column: value}}
        Value::Object(mut map) if map.contains_key("rows") => {
            let count = map.get("count").and_then(Value::as_u64).unwrap_or(0);
            match map.remove("rows") {
                Some(rows @ Value::Object(_)) if count > 0 => {
                    let mut record: Record = serde_json::from_value(rows)
                        .map_err(|e| SearchError::parse(e.to_string()))?;
                    record.object_id = record.object_id.map(numeric_id);
                    Ok(vec![record])
                }
                _ => Ok(Vec::new()),
            }
        }
        other => Err(SearchError::parse(format!(
            "unexpected hits payload: {}",
            other
        ))),
    }
}

/// Result-set rows carry every column as text; restore integer ids.
fn numeric_id(id: ObjectId) -> ObjectId {
    match id {
        ObjectId::Text(text) => match text.parse::<i64>() {
            Ok(n) if n.to_string() == text => ObjectId::Number(n),
            _ => ObjectId::Text(text),
        },
        other => other,
    }
}
