//! Search error types.
//!
//! This module defines the errors surfaced by the client boundary. Every
//! variant serializes to JSON so callers can print a diagnostic that parses
//! back.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while talking to the search service.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", content = "message")]
pub enum SearchError {
    /// Input rejected before any request was sent.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// No configured host could be reached.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to decode a response from the service.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An indexing task was still pending after the last poll.
    #[error("Task {task_id} not published after {attempts} polls")]
    TaskTimeout { task_id: i64, attempts: u32 },
}

impl SearchError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an API error from a response status and message.
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: msg.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a task timeout error.
    pub fn task_timeout(task_id: i64, attempts: u32) -> Self {
        Self::TaskTimeout { task_id, attempts }
    }

    /// The index or resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// The credentials were rejected.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::ApiError { status: 401 | 403, .. })
    }

    /// The request was malformed, locally or according to the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::BatchSizeExceeded { .. }
                | Self::ApiError {
                    status: 400 | 422,
                    ..
                }
        )
    }

    /// Pretty JSON rendering of the error.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| serde_json::Value::String(self.to_string()).to_string())
    }
}
