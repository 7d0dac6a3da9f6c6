//! # Search Demo Shared
//!
//! Plain data types shared by the search demo crates: host descriptors,
//! records, search parameters, and the decoded service responses.

pub mod host;
pub mod record;
pub mod response;

pub use host::{CallKind, HostDescriptor};
pub use record::{ObjectId, Record, SearchParams};
pub use response::{SaveObjectsResponse, SearchResponse, TaskStatus};
