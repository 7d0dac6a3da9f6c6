//! Records submitted for indexing and the parameters of a search.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The unique key a record is addressed by within an index.
///
/// The service accepts both integers and strings and echoes back whatever
/// it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Number(n) => write!(f, "{}", n),
            ObjectId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ObjectId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ObjectId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A record: an `objectID` plus arbitrary additional fields.
///
/// Hits returned by a search decode into the same shape; any extra
/// attributes the service adds (highlighting and so on) land in `fields`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(
        rename = "objectID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub object_id: Option<ObjectId>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Create a record with the given identifier and no fields.
    pub fn new(object_id: impl Into<ObjectId>) -> Self {
        Self {
            object_id: Some(object_id.into()),
            fields: Map::new(),
        }
    }

    /// Create a record without an identifier.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Parameters of a search request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits_per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_hits_per_page(mut self, hits_per_page: u32) -> Self {
        self.hits_per_page = Some(hits_per_page);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_flat() {
        let record = Record::new(1)
            .with_field("title", "El foo de la fuera")
            .with_field("body", "El fuero de la fuera");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "objectID": 1,
                "title": "El foo de la fuera",
                "body": "El fuero de la fuera"
            })
        );
    }

    #[test]
    fn test_record_without_id_omits_key() {
        let record = Record::anonymous().with_field("name", "Ada");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("objectID").is_none());
    }

    #[test]
    fn test_hit_keeps_extra_attributes() {
        let hit: Record = serde_json::from_value(json!({
            "objectID": "abc",
            "title": "El foo",
            "_highlightResult": {"title": {"value": "<em>El</em> foo"}}
        }))
        .unwrap();

        assert_eq!(hit.object_id, Some(ObjectId::from("abc")));
        assert_eq!(hit.field("title"), Some(&json!("El foo")));
        assert!(hit.field("_highlightResult").is_some());
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId::from(1).to_string(), "1");
        assert_eq!(ObjectId::from("doc-7").to_string(), "doc-7");
    }

    #[test]
    fn test_search_params_omit_unset_options() {
        let params = SearchParams::new("fuera");
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"query": "fuera"}));

        let params = SearchParams::new("fuera").with_hits_per_page(5).with_page(2);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"query": "fuera", "hitsPerPage": 5, "page": 2})
        );
    }
}
