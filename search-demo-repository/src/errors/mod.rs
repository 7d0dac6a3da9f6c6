//! Error types for the search demo repository.

mod search_error;

pub use search_error::SearchError;
