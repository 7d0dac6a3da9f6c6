//! Interface definitions for the search service client.
//!
//! This module defines the abstract `SearchProvider` trait that allows
//! for dependency injection and swappable transport implementations.

mod search_provider;

pub use search_provider::SearchProvider;
